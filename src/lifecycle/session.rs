use crate::core::Identity;
use crate::facade::LegacyStore;
use crate::storage::KeyValueStore;
use std::sync::Arc;

/// Who is calling, and which store their writes are billed to.
///
/// Passed explicitly into every [`LifecycleManager`](super::LifecycleManager)
/// operation; there is no ambient account state.
#[derive(Clone)]
pub struct Session {
    caller: Identity,
    store: LegacyStore,
}

impl Session {
    pub fn new(caller: impl Into<Identity>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            caller: caller.into(),
            store: LegacyStore::new(store),
        }
    }

    /// A session for another identity against the same store.
    pub fn switch_caller(&self, caller: impl Into<Identity>) -> Self {
        Self {
            caller: caller.into(),
            store: self.store.clone(),
        }
    }

    pub fn caller(&self) -> &Identity {
        &self.caller
    }

    pub fn store(&self) -> &LegacyStore {
        &self.store
    }
}
