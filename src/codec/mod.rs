//! Byte encodings for everything the vault writes to the external store.
//!
//! Both payload kinds are UTF-8 JSON text: a record is an object with the
//! field names in [`StoredLegacyPayload`], the index is an array of ids.

mod payload;

pub use payload::StoredLegacyPayload;

use crate::core::{LegacyError, LegacyRecord, LegacyStatus, Result};

pub fn encode_record(record: &LegacyRecord) -> Result<Vec<u8>> {
    serde_json::to_vec(&StoredLegacyPayload::from(record))
        .map_err(|e| LegacyError::store(format!("Failed to encode legacy '{}': {}", record.id(), e)))
}

/// Decodes a self-contained payload; the record id must be embedded.
pub fn decode_record(bytes: &[u8]) -> Result<LegacyRecord> {
    parse_payload(bytes)?.into_record(None)
}

/// Decodes a payload read from `legacy_<id>`. Payloads written without an
/// embedded id are accepted.
pub fn decode_record_for_key(id: &str, bytes: &[u8]) -> Result<LegacyRecord> {
    parse_payload(bytes)?.into_record(Some(id))
}

/// Rewrites only `status` in a stored payload. Every other field, including
/// ones this version does not know, is written back as it was read; a
/// missing `timestamp` stays missing.
pub fn patch_status(id: &str, bytes: &[u8], status: LegacyStatus) -> Result<Vec<u8>> {
    let mut payload = parse_payload(bytes)?;
    payload.status = Some(status.to_string());
    serde_json::to_vec(&payload)
        .map_err(|e| LegacyError::store(format!("Failed to encode legacy '{}': {}", id, e)))
}

fn parse_payload(bytes: &[u8]) -> Result<StoredLegacyPayload> {
    if bytes.is_empty() {
        return Err(LegacyError::decode("empty payload"));
    }
    Ok(serde_json::from_slice(bytes)?)
}

pub fn encode_index(ids: &[String]) -> Result<Vec<u8>> {
    serde_json::to_vec(ids).map_err(|e| LegacyError::store(format!("Failed to encode index: {}", e)))
}

/// Empty bytes are an empty index, not an error.
pub fn decode_index(bytes: &[u8]) -> Result<Vec<String>> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_slice(bytes)?)
}
