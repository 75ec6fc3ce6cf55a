//! Key layout inside the external store.

/// Reserved key holding the serialized list of every record id.
pub const INDEX_KEY: &str = "legacy_keys";

/// Prefix for per-record payload keys.
pub const RECORD_KEY_PREFIX: &str = "legacy_";

pub fn record_key(id: &str) -> String {
    format!("{}{}", RECORD_KEY_PREFIX, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        assert_eq!(INDEX_KEY, "legacy_keys");
        assert_eq!(record_key("1700000000000-x9k2"), "legacy_1700000000000-x9k2");
    }
}
