use serde::{Deserialize, Serialize};
use std::fmt;

/// Address-like identity of a caller, owner or beneficiary.
///
/// Stored exactly as supplied. Comparison through [`Identity::matches`]
/// ignores ASCII case, since wallet addresses come back from providers in
/// both checksummed and lower-case form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Identity {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_ignores_case_and_padding() {
        let caller = Identity::new("0xAbCd");
        assert!(caller.matches("0xabcd"));
        assert!(caller.matches(" 0XABCD "));
        assert!(!caller.matches("0xabce"));
    }

    #[test]
    fn test_new_trims() {
        assert_eq!(Identity::new("  0xAAA ").as_str(), "0xAAA");
        assert!(Identity::new("   ").is_empty());
    }
}
