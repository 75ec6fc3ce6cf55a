//! File-backed key/value store used by the command line front end.
//!
//! The whole key space lives in memory and every `set` rewrites a single
//! MessagePack snapshot file through a temp file in the same directory, so a
//! crash leaves either the old or the new snapshot on disk.

use super::engine::KeyValueStore;
use crate::core::{LegacyError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::debug;

const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub version: u32,
    pub entries: HashMap<String, Vec<u8>>,
    pub metadata: SnapshotMetadata,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    /// Unix millis of the write that produced this snapshot.
    pub saved_at: i64,
    pub entry_count: usize,
}

impl StoreSnapshot {
    fn new(entries: HashMap<String, Vec<u8>>) -> Self {
        let entry_count = entries.len();
        Self {
            version: SNAPSHOT_VERSION,
            entries,
            metadata: SnapshotMetadata {
                saved_at: chrono::Utc::now().timestamp_millis(),
                entry_count,
            },
        }
    }
}

pub struct FileKvStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl FileKvStore {
    /// Opens the store at `path`, loading the existing snapshot if there is one.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match load_snapshot(&path)? {
            Some(snapshot) => snapshot.entries,
            None => HashMap::new(),
        };
        debug!(path = %path.display(), entries = entries.len(), "opened file store");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl KeyValueStore for FileKvStore {
    async fn is_available(&self) -> bool {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.is_dir(),
            _ => true,
        }
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        Ok(self.entries.read().await.get(key).cloned().unwrap_or_default())
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let mut entries = self.entries.write().await;
        let mut next = entries.clone();
        next.insert(key.to_string(), value);

        let path = self.path.clone();
        let snapshot = StoreSnapshot::new(next);
        let snapshot = tokio::task::spawn_blocking(move || {
            save_snapshot(&path, &snapshot).map(|()| snapshot)
        })
        .await
        .map_err(|e| LegacyError::store(format!("snapshot writer panicked: {}", e)))??;

        *entries = snapshot.entries;
        debug!(key, path = %self.path.display(), "persisted store snapshot");
        Ok(())
    }
}

fn save_snapshot(path: &Path, snapshot: &StoreSnapshot) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)
        .map_err(|e| LegacyError::store(format!("Failed to create store directory: {}", e)))?;

    let serialized = rmp_serde::to_vec(snapshot)
        .map_err(|e| LegacyError::store(format!("Failed to serialize snapshot: {}", e)))?;

    let mut temp = tempfile::NamedTempFile::new_in(&dir)
        .map_err(|e| LegacyError::store(format!("Failed to create temp file: {}", e)))?;
    temp.write_all(&serialized)
        .map_err(|e| LegacyError::store(format!("Failed to write snapshot: {}", e)))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| LegacyError::store(format!("Failed to sync snapshot: {}", e)))?;
    temp.persist(path)
        .map_err(|e| LegacyError::store(format!("Failed to replace snapshot: {}", e)))?;
    Ok(())
}

fn load_snapshot(path: &Path) -> Result<Option<StoreSnapshot>> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read(path)
        .map_err(|e| LegacyError::store(format!("Failed to read snapshot: {}", e)))?;
    let snapshot: StoreSnapshot = rmp_serde::from_slice(&data)
        .map_err(|e| LegacyError::decode(format!("Failed to deserialize snapshot: {}", e)))?;
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(LegacyError::decode(format!(
            "unsupported snapshot version {}",
            snapshot.version
        )));
    }
    Ok(Some(snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vault.snapshot");

        {
            let store = FileKvStore::open(&path).unwrap();
            assert!(store.is_available().await);
            store.set("legacy_keys", b"[\"a\"]".to_vec()).await.unwrap();
            store.set("legacy_a", b"{}".to_vec()).await.unwrap();
        }

        let reopened = FileKvStore::open(&path).unwrap();
        assert_eq!(reopened.get("legacy_keys").await.unwrap(), b"[\"a\"]".to_vec());
        assert_eq!(reopened.get("legacy_a").await.unwrap(), b"{}".to_vec());
        assert!(reopened.get("legacy_b").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_is_a_decode_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vault.snapshot");
        fs::write(&path, b"definitely not msgpack").unwrap();

        let err = FileKvStore::open(&path).err().unwrap();
        assert!(matches!(err, LegacyError::Decode(_)));
    }

    #[tokio::test]
    async fn test_missing_directory_is_unavailable() {
        let dir = tempdir().unwrap();
        let store = FileKvStore::open(dir.path().join("nope").join("vault.snapshot")).unwrap();
        assert!(!store.is_available().await);
    }
}
