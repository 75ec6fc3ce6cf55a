use thiserror::Error;

#[derive(Error, Debug)]
pub enum LegacyError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Legacy '{0}' not found")]
    NotFound(String),

    #[error("Caller '{caller}' is not the owner of legacy '{id}'")]
    Unauthorized { id: String, caller: String },

    #[error("Legacy '{id}' is {status}, expected active")]
    InvalidState { id: String, status: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Inheritance conditions not met for legacy '{0}'")]
    ConditionsUnmet(String),
}

pub type Result<T> = std::result::Result<T, LegacyError>;

impl LegacyError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable(message.into())
    }

    /// True for failures of the external store, where repeating the same
    /// call may succeed. Caller mistakes never qualify.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_) | Self::Store(_))
    }
}

impl From<serde_json::Error> for LegacyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
