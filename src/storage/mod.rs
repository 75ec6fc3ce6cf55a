pub mod engine;
pub mod keys;
pub mod memory;
pub mod persistence;

pub use engine::KeyValueStore;
pub use keys::{INDEX_KEY, RECORD_KEY_PREFIX, record_key};
pub use memory::InMemoryKvStore;
pub use persistence::FileKvStore;
