use crate::core::{LegacyError, NewLegacy, Result};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Produces the opaque protected payload stored with a record.
///
/// The vault only stores what comes back and never asks for it to be
/// reversed.
#[async_trait]
pub trait ConfidentialityProvider: Send + Sync {
    async fn protect(&self, fields: &NewLegacy) -> Result<String>;
}

/// Stand-in for a homomorphic encryption service: `FHE-` followed by the
/// base64 of the JSON form. Not confidential.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedFheProvider;

impl SimulatedFheProvider {
    pub const PREFIX: &'static str = "FHE-";
}

#[async_trait]
impl ConfidentialityProvider for SimulatedFheProvider {
    async fn protect(&self, fields: &NewLegacy) -> Result<String> {
        let json = serde_json::to_vec(fields)
            .map_err(|e| LegacyError::validation(format!("fields cannot be serialized: {}", e)))?;
        Ok(format!("{}{}", Self::PREFIX, STANDARD.encode(json)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simulated_payload_shape() {
        let fields = NewLegacy::new("Crypto Wallet", "seed words", "0xBEEF")
            .conditions("on proof of death");
        let protected = SimulatedFheProvider.protect(&fields).await.unwrap();

        let encoded = protected.strip_prefix(SimulatedFheProvider::PREFIX).unwrap();
        let decoded: serde_json::Value =
            serde_json::from_slice(&STANDARD.decode(encoded).unwrap()).unwrap();
        assert_eq!(decoded["sensitiveInfo"], "seed words");
        assert_eq!(decoded["conditions"], "on proof of death");
    }
}
