// ============================================================================
// LegacyVault Library
// ============================================================================

pub mod codec;
pub mod config;
pub mod core;
pub mod facade;
pub mod index;
pub mod lifecycle;
pub mod report;
pub mod storage;

// Re-export main types for convenience
pub use config::VaultConfig;
pub use crate::core::{
    AssetCategory, CategoryPolicy, Identity, LegacyError, LegacyRecord, LegacyStatus,
    LegacyTransition, NewLegacy, Result,
};
pub use facade::{IndexAudit, LegacyStore};
pub use index::KeyIndex;
pub use lifecycle::{
    ConditionVerifier, ConfidentialityProvider, DelayedVerifier, ImmediateVerifier,
    LifecycleManager, Session, SimulatedFheProvider,
};
pub use report::{LegacyStats, owned_by};
pub use storage::{FileKvStore, InMemoryKvStore, KeyValueStore};

use std::sync::Arc;

// ============================================================================
// High-level Vault API
// ============================================================================

/// A caller bound to a store and a lifecycle manager.
///
/// This is the shortest path for applications that act on behalf of one
/// identity at a time.
///
/// # Examples
///
/// ```
/// use legacyvault::{LegacyStatus, LegacyVault, NewLegacy};
///
/// # tokio_test::block_on(async {
/// let vault = LegacyVault::in_memory("0xAAA");
///
/// let id = vault
///     .create(
///         NewLegacy::new("Crypto Wallet", "seed words", "0xBEEF")
///             .conditions("on proof of death"),
///     )
///     .await?;
///
/// let record = vault.trigger_inheritance(&id).await?;
/// assert_eq!(record.status(), LegacyStatus::Inherited);
/// # Ok::<(), legacyvault::LegacyError>(())
/// # }).unwrap();
/// ```
#[derive(Clone)]
pub struct LegacyVault {
    manager: LifecycleManager,
    session: Session,
}

impl LegacyVault {
    pub fn new(manager: LifecycleManager, session: Session) -> Self {
        Self { manager, session }
    }

    /// Vault over a fresh in-process store with default settings.
    pub fn in_memory(caller: impl Into<Identity>) -> Self {
        let config = VaultConfig::default();
        Self::with_store(&config, caller, Arc::new(InMemoryKvStore::new()))
    }

    /// Vault over the file-backed store at `config.data_path`.
    pub fn open(config: &VaultConfig, caller: impl Into<Identity>) -> Result<Self> {
        let store = FileKvStore::open(&config.data_path)?;
        Ok(Self::with_store(config, caller, Arc::new(store)))
    }

    pub fn with_store(
        config: &VaultConfig,
        caller: impl Into<Identity>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            manager: config.lifecycle_manager(),
            session: Session::new(caller, store),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn manager(&self) -> &LifecycleManager {
        &self.manager
    }

    pub async fn create(&self, fields: NewLegacy) -> Result<String> {
        self.manager.create(&self.session, fields).await
    }

    pub async fn get(&self, id: &str) -> Result<LegacyRecord> {
        self.manager.get(&self.session, id).await
    }

    pub async fn list(&self) -> Result<Vec<LegacyRecord>> {
        self.manager.list(&self.session).await
    }

    /// Records owned by this vault's caller, newest first.
    pub async fn list_mine(&self) -> Result<Vec<LegacyRecord>> {
        let records = self.list().await?;
        Ok(owned_by(&records, self.session.caller())
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn trigger_inheritance(&self, id: &str) -> Result<LegacyRecord> {
        self.manager.trigger_inheritance(&self.session, id).await
    }

    pub async fn expire(&self, id: &str) -> Result<LegacyRecord> {
        self.manager.expire(&self.session, id).await
    }

    pub async fn stats(&self) -> Result<LegacyStats> {
        Ok(LegacyStats::from_records(&self.list().await?))
    }

    pub async fn audit(&self) -> Result<IndexAudit> {
        self.session.store().audit_index().await
    }
}
