use crate::core::{LegacyError, LegacyRecord, LegacyStatus, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// On-store shape of a record, as JSON text.
///
/// Every field is optional so payloads written by older clients still
/// parse; [`StoredLegacyPayload::into_record`] applies the defaults and
/// rejects payloads missing a required field. Unknown fields are carried
/// in `extra` and written back untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredLegacyPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(
        default,
        deserialize_with = "timestamp_from_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beneficiary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<&LegacyRecord> for StoredLegacyPayload {
    fn from(record: &LegacyRecord) -> Self {
        Self {
            id: Some(record.id().to_string()),
            data: Some(record.encrypted_payload().to_string()),
            timestamp: Some(record.created_at()),
            owner: Some(record.owner().to_string()),
            category: Some(record.category().to_string()),
            status: Some(record.status().to_string()),
            beneficiary: Some(record.beneficiary().to_string()),
            conditions: Some(record.inheritance_conditions().to_string()),
            extra: Map::new(),
        }
    }
}

impl StoredLegacyPayload {
    /// Upgrades the partial payload to a full record.
    ///
    /// `key_id` is the id the payload was stored under; when given it wins
    /// over an embedded `id`, since the key is what the index points at.
    pub fn into_record(self, key_id: Option<&str>) -> Result<LegacyRecord> {
        let id = match (key_id, self.id) {
            (Some(key_id), _) => key_id.to_string(),
            (None, Some(id)) => id,
            (None, None) => return Err(LegacyError::decode("missing field 'id'")),
        };
        let data = self.data.ok_or_else(|| missing(&id, "data"))?;
        let owner = self.owner.ok_or_else(|| missing(&id, "owner"))?;
        let category = self.category.ok_or_else(|| missing(&id, "category"))?;

        let status = match self.status.as_deref() {
            None | Some("") => LegacyStatus::Active,
            Some(raw) => raw
                .parse::<LegacyStatus>()
                .map_err(|_| LegacyError::decode(format!("legacy '{}': unknown status '{}'", id, raw)))?,
        };

        Ok(LegacyRecord::new(
            id,
            owner,
            category,
            data,
            self.beneficiary.unwrap_or_default(),
            self.conditions.unwrap_or_default(),
            self.timestamp.unwrap_or_default(),
            status,
        ))
    }
}

fn missing(id: &str, field: &str) -> LegacyError {
    LegacyError::decode(format!("legacy '{}': missing field '{}'", id, field))
}

/// Seconds since the epoch. Fractional values are truncated.
fn timestamp_from_number<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(secs) => Ok(Some(secs)),
            None => n
                .as_f64()
                .filter(|f| f.is_finite() && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| Some(f.trunc() as i64))
                .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {}", n))),
        },
        Some(other) => Err(D::Error::custom(format!("timestamp must be a number, got {}", other))),
    }
}
