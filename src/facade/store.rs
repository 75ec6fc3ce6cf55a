use crate::codec::{decode_record_for_key, encode_record, patch_status};
use crate::core::{LegacyError, LegacyRecord, LegacyStatus, Result};
use crate::index::KeyIndex;
use crate::storage::{KeyValueStore, record_key};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Findings of [`LegacyStore::audit_index`]. Nothing is repaired.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexAudit {
    /// Number of entries in the index, duplicates included.
    pub indexed: usize,
    /// Indexed ids with no payload under their record key.
    pub dangling: Vec<String>,
    /// Indexed ids whose payload does not decode.
    pub undecodable: Vec<String>,
    /// Ids indexed more than once (each listed once).
    pub duplicates: Vec<String>,
}

impl IndexAudit {
    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty() && self.undecodable.is_empty() && self.duplicates.is_empty()
    }
}

/// Single point of contact with the external store: composes the key index
/// and the record codec.
#[derive(Clone)]
pub struct LegacyStore {
    store: Arc<dyn KeyValueStore>,
    index: KeyIndex,
}

impl LegacyStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let index = KeyIndex::new(store.clone());
        Self { store, index }
    }

    pub fn index(&self) -> &KeyIndex {
        &self.index
    }

    pub async fn is_available(&self) -> bool {
        self.store.is_available().await
    }

    pub async fn ensure_available(&self) -> Result<()> {
        if self.store.is_available().await {
            Ok(())
        } else {
            Err(LegacyError::unavailable("legacy store did not answer the availability probe"))
        }
    }

    /// Every readable record, newest first.
    ///
    /// Records that fail to fetch or decode are logged and skipped; an id
    /// indexed twice is returned once.
    pub async fn list_all(&self) -> Result<Vec<LegacyRecord>> {
        self.ensure_available().await?;

        let ids = self.index.list_ids().await?;
        let mut seen = HashSet::with_capacity(ids.len());
        let mut records = Vec::with_capacity(ids.len());

        for id in ids {
            if !seen.insert(id.clone()) {
                continue;
            }
            match self.fetch(&id).await {
                Ok(Some(record)) => records.push(record),
                Ok(None) => warn!(id = %id, "indexed legacy has no payload, skipping"),
                Err(err) => warn!(id = %id, error = %err, "failed to load legacy, skipping"),
            }
        }

        records.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        debug!(count = records.len(), "listed legacies");
        Ok(records)
    }

    /// Reads one record. `None` when nothing is stored under its key.
    pub async fn load(&self, id: &str) -> Result<Option<LegacyRecord>> {
        self.ensure_available().await?;
        self.fetch(id).await
    }

    /// Writes the record payload. Does not touch the index.
    pub async fn save(&self, record: &LegacyRecord) -> Result<()> {
        self.ensure_available().await?;
        let bytes = encode_record(record)?;
        self.store.set(&record_key(record.id()), bytes).await?;
        debug!(id = record.id(), status = %record.status(), "saved legacy");
        Ok(())
    }

    /// Changes the stored status of `id` and leaves the rest of its payload
    /// as written, unknown fields included.
    pub async fn update_status(&self, id: &str, status: LegacyStatus) -> Result<()> {
        self.ensure_available().await?;
        let key = record_key(id);
        let bytes = self.store.get(&key).await?;
        if bytes.is_empty() {
            return Err(LegacyError::not_found(id));
        }
        let patched = patch_status(id, &bytes, status)?;
        self.store.set(&key, patched).await?;
        debug!(id, status = %status, "updated legacy status");
        Ok(())
    }

    /// Saves the record and indexes its id if it is not indexed yet.
    ///
    /// Safe to repeat after a partial failure: a retry rewrites the same
    /// payload and appends the id at most once.
    pub async fn register_record(&self, record: &LegacyRecord) -> Result<()> {
        self.save(record).await?;
        if !self.index.append_if_absent(record.id()).await? {
            debug!(id = record.id(), "legacy already indexed");
        }
        Ok(())
    }

    /// Walks the index and reports entries that cannot be listed.
    ///
    /// Records saved but never indexed are invisible here, since the store
    /// offers no key enumeration; re-running [`LegacyStore::register_record`]
    /// for them is the repair.
    pub async fn audit_index(&self) -> Result<IndexAudit> {
        self.ensure_available().await?;

        let ids = self.index.list_ids().await?;
        let mut audit = IndexAudit {
            indexed: ids.len(),
            ..IndexAudit::default()
        };
        let mut seen = HashSet::with_capacity(ids.len());

        for id in ids {
            if !seen.insert(id.clone()) {
                if !audit.duplicates.contains(&id) {
                    audit.duplicates.push(id);
                }
                continue;
            }
            let bytes = self.store.get(&record_key(&id)).await?;
            if bytes.is_empty() {
                audit.dangling.push(id);
            } else if decode_record_for_key(&id, &bytes).is_err() {
                audit.undecodable.push(id);
            }
        }

        Ok(audit)
    }

    async fn fetch(&self, id: &str) -> Result<Option<LegacyRecord>> {
        let bytes = self.store.get(&record_key(id)).await?;
        if bytes.is_empty() {
            return Ok(None);
        }
        decode_record_for_key(id, &bytes).map(Some)
    }
}
