use crate::core::CategoryPolicy;
use crate::lifecycle::{DelayedVerifier, LifecycleManager, SimulatedFheProvider};
use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub const ENV_DATA: &str = "LEGACY_VAULT_DATA";
pub const ENV_VERIFY_DELAY_MS: &str = "LEGACY_VAULT_VERIFY_DELAY_MS";
pub const ENV_STRICT_CATEGORIES: &str = "LEGACY_VAULT_STRICT_CATEGORIES";
pub const ENV_LOG: &str = "LEGACY_VAULT_LOG";

/// Vault configuration
#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// Snapshot file of the file-backed store
    pub data_path: PathBuf,

    /// Simulated duration of the inheritance condition check
    pub verify_delay: Duration,

    /// Category check applied on create
    pub category_policy: CategoryPolicy,

    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(".legacy-vault/vault.snapshot"),
            verify_delay: Duration::ZERO,
            category_policy: CategoryPolicy::Open,
            log_filter: "legacyvault=info".to_string(),
        }
    }
}

impl VaultConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_DATA) {
            config.data_path = PathBuf::from(path);
        }
        if let Some(raw) = lookup(ENV_VERIFY_DELAY_MS) {
            let millis = raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{} must be a number of milliseconds", ENV_VERIFY_DELAY_MS))?;
            config.verify_delay = Duration::from_millis(millis);
        }
        if let Some(raw) = lookup(ENV_STRICT_CATEGORIES) {
            config.category_policy = if parse_flag(&raw)
                .with_context(|| format!("{} must be a boolean", ENV_STRICT_CATEGORIES))?
            {
                CategoryPolicy::Known
            } else {
                CategoryPolicy::Open
            };
        }
        if let Some(filter) = lookup(ENV_LOG) {
            config.log_filter = filter;
        }

        Ok(config)
    }

    /// Set the store snapshot path
    pub fn data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    /// Set the verification delay
    pub fn verify_delay(mut self, delay: Duration) -> Self {
        self.verify_delay = delay;
        self
    }

    /// Set the category policy
    pub fn category_policy(mut self, policy: CategoryPolicy) -> Self {
        self.category_policy = policy;
        self
    }

    /// Lifecycle manager wired with the simulated confidentiality provider.
    pub fn lifecycle_manager(&self) -> LifecycleManager {
        let manager = LifecycleManager::new(Arc::new(SimulatedFheProvider))
            .with_category_policy(self.category_policy);
        if self.verify_delay.is_zero() {
            manager
        } else {
            manager.with_verifier(Arc::new(DelayedVerifier::new(self.verify_delay)))
        }
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("unrecognized flag value '{}'", other),
    }
}
