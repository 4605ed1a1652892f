// Service exports
pub mod preferences;
pub mod storage;

pub use preferences::{PreferenceRegistry, PreferenceStore};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError, StorageKey};
