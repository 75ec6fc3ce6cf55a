pub mod store;

pub use store::{IndexAudit, LegacyStore};
