use crate::core::{LegacyRecord, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// External check that a record's inheritance conditions hold.
#[async_trait]
pub trait ConditionVerifier: Send + Sync {
    async fn verify(&self, record: &LegacyRecord) -> Result<bool>;
}

/// Approves every request immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateVerifier;

#[async_trait]
impl ConditionVerifier for ImmediateVerifier {
    async fn verify(&self, _record: &LegacyRecord) -> Result<bool> {
        Ok(true)
    }
}

/// Approves after a fixed delay, standing in for a slow encrypted computation.
#[derive(Debug, Clone, Copy)]
pub struct DelayedVerifier {
    delay: Duration,
}

impl DelayedVerifier {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl ConditionVerifier for DelayedVerifier {
    async fn verify(&self, record: &LegacyRecord) -> Result<bool> {
        debug!(id = record.id(), delay_ms = self.delay.as_millis() as u64, "verifying inheritance conditions");
        tokio::time::sleep(self.delay).await;
        Ok(true)
    }
}
