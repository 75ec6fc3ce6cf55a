use super::engine::KeyValueStore;
use crate::core::{LegacyError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// In-process store. Each key is read and written atomically; there is no
/// cross-key transaction, same as the real collaborator.
///
/// Also serves as a test double: availability can be toggled, writes to
/// specific keys can be made to fail, and writes are counted.
pub struct InMemoryKvStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
    available: AtomicBool,
    failing_keys: RwLock<HashSet<String>>,
    writes: AtomicUsize,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            available: AtomicBool::new(true),
            failing_keys: RwLock::new(HashSet::new()),
            writes: AtomicUsize::new(0),
        }
    }

    /// Builds a store pre-seeded with raw payloads.
    pub fn with_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<u8>)>,
        K: Into<String>,
    {
        let seeded = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self {
            entries: RwLock::new(seeded),
            ..Self::new()
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Makes every subsequent `set` on `key` fail with a store error.
    pub async fn fail_writes_to(&self, key: &str) {
        self.failing_keys.write().await.insert(key.to_string());
    }

    pub async fn clear_failures(&self) {
        self.failing_keys.write().await.clear();
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub async fn contains_key(&self, key: &str) -> bool {
        self.entries.read().await.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryKvStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKvStore {
    async fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        Ok(self.entries.read().await.get(key).cloned().unwrap_or_default())
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        if self.failing_keys.read().await.contains(key) {
            return Err(LegacyError::store(format!("write to '{}' rejected", key)));
        }
        self.entries.write().await.insert(key.to_string(), value);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
