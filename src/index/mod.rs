//! Append-only list of every record id, stored under [`INDEX_KEY`].

use crate::codec::{decode_index, encode_index};
use crate::core::Result;
use crate::storage::{INDEX_KEY, KeyValueStore};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct KeyIndex {
    store: Arc<dyn KeyValueStore>,
}

impl KeyIndex {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Ids in insertion order.
    ///
    /// An unreadable index is treated as "no index yet" and yields an empty
    /// list, so listing keeps working; store errors still propagate.
    pub async fn list_ids(&self) -> Result<Vec<String>> {
        let bytes = self.store.get(INDEX_KEY).await?;
        match decode_index(&bytes) {
            Ok(ids) => {
                debug!(count = ids.len(), "read legacy index");
                Ok(ids)
            }
            Err(err) => {
                warn!(error = %err, "legacy index is unreadable, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Read-modify-write of the index. Duplicates are not checked and a
    /// concurrent append from another writer may be lost.
    pub async fn append(&self, id: &str) -> Result<()> {
        let mut ids = self.list_ids().await?;
        ids.push(id.to_string());
        self.store.set(INDEX_KEY, encode_index(&ids)?).await?;
        debug!(id, count = ids.len(), "appended to legacy index");
        Ok(())
    }

    /// Appends `id` unless it is already indexed. Returns whether a write happened.
    pub async fn append_if_absent(&self, id: &str) -> Result<bool> {
        let mut ids = self.list_ids().await?;
        if ids.iter().any(|existing| existing == id) {
            return Ok(false);
        }
        ids.push(id.to_string());
        self.store.set(INDEX_KEY, encode_index(&ids)?).await?;
        debug!(id, count = ids.len(), "appended to legacy index");
        Ok(true)
    }

    pub async fn contains(&self, id: &str) -> Result<bool> {
        Ok(self.list_ids().await?.iter().any(|existing| existing == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryKvStore;

    #[tokio::test]
    async fn test_missing_index_is_empty() {
        let index = KeyIndex::new(Arc::new(InMemoryKvStore::new()));
        assert!(index.list_ids().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_index_is_empty() {
        let store = InMemoryKvStore::with_entries([(INDEX_KEY, b"not json".to_vec())]);
        let index = KeyIndex::new(Arc::new(store));
        assert!(index.list_ids().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_keeps_order_and_duplicates() {
        let store = Arc::new(InMemoryKvStore::new());
        let index = KeyIndex::new(store.clone());

        index.append("b").await.unwrap();
        index.append("a").await.unwrap();
        index.append("b").await.unwrap();

        assert_eq!(index.list_ids().await.unwrap(), vec!["b", "a", "b"]);
        assert_eq!(store.get(INDEX_KEY).await.unwrap(), br#"["b","a","b"]"#.to_vec());
    }

    #[tokio::test]
    async fn test_append_if_absent() {
        let store = Arc::new(InMemoryKvStore::new());
        let index = KeyIndex::new(store.clone());

        assert!(index.append_if_absent("a").await.unwrap());
        assert!(!index.append_if_absent("a").await.unwrap());
        assert_eq!(store.write_count(), 1);
        assert!(index.contains("a").await.unwrap());
        assert!(!index.contains("z").await.unwrap());
    }

    #[tokio::test]
    async fn test_append_over_malformed_index_starts_fresh() {
        let store = Arc::new(InMemoryKvStore::with_entries([(INDEX_KEY, b"{".to_vec())]));
        let index = KeyIndex::new(store);
        index.append("a").await.unwrap();
        assert_eq!(index.list_ids().await.unwrap(), vec!["a"]);
    }
}
