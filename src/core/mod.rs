pub mod error;
pub mod identity;
pub mod record;

pub use error::{LegacyError, Result};
pub use identity::Identity;
pub use record::{
    AssetCategory, CategoryPolicy, LegacyRecord, LegacyStatus, LegacyTransition, NewLegacy,
};
