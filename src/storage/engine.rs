use crate::core::Result;
use async_trait::async_trait;

/// Address-scoped key/value store the vault persists into.
///
/// Implementations are expected to be linearizable per key. Nothing here is
/// transactional across keys; the caller identity that pays for a write is
/// bound to the store handle, not passed per call.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Liveness probe. When this returns false no reads or writes are attempted.
    async fn is_available(&self) -> bool;

    /// Returns the value under `key`, or empty bytes when the key is absent.
    async fn get(&self, key: &str) -> Result<Vec<u8>>;

    /// Overwrites the value under `key`.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()>;
}
