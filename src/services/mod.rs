// Service exports
pub mod storage;

pub use storage::{
    FileStore, KeyValueStore, MemoryStore, SavedLists, StoreError, FAVORITES_KEY, HISTORY_KEY,
    MAX_HISTORY_ENTRIES,
};
