use crate::models::{FavoriteEntry, HistoryEntry};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use thiserror::Error;

/// Storage key for the favorites list
pub const FAVORITES_KEY: &str = "nnw_favorites";
/// Storage key for the history list
pub const HISTORY_KEY: &str = "nnw_history";
/// Most history entries ever kept
pub const MAX_HISTORY_ENTRIES: usize = 50;

/// Errors that can occur with store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Per-profile string key-value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store, lost on drop
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One JSON file per key inside a profile directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a profile directory, creating it if needed
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        // Write beside the target and rename so readers never see half a file
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// Favorites and history for one profile
///
/// Both lists live in memory; every change is written through to the store.
/// Unreadable or corrupt stored data loads as empty lists.
pub struct SavedLists<S: KeyValueStore> {
    store: S,
    favorites: Vec<FavoriteEntry>,
    history: Vec<HistoryEntry>,
    history_limit: usize,
}

impl<S: KeyValueStore> SavedLists<S> {
    /// Read both lists from the store
    ///
    /// `history_limit` is capped at [`MAX_HISTORY_ENTRIES`].
    pub fn load(store: S, history_limit: usize) -> Self {
        let history_limit = history_limit.min(MAX_HISTORY_ENTRIES);
        let (favorites, history) = match (
            read_list::<FavoriteEntry, _>(&store, FAVORITES_KEY),
            read_list::<HistoryEntry, _>(&store, HISTORY_KEY),
        ) {
            (Ok(favorites), Ok(history)) => (favorites, history),
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!("Saved lists unreadable, starting empty: {}", e);
                (Vec::new(), Vec::new())
            }
        };

        let mut lists = Self {
            store,
            favorites,
            history,
            history_limit,
        };
        lists.history.truncate(history_limit);
        dedup_favorites(&mut lists.favorites);

        tracing::debug!(
            "Loaded {} favorites and {} history entries",
            lists.favorites.len(),
            lists.history.len()
        );
        lists
    }

    pub fn favorites(&self) -> &[FavoriteEntry] {
        &self.favorites
    }

    /// Most recent first
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.iter().any(|f| f.id == id)
    }

    /// Add a favorite. Returns `Ok(false)` when the id was already saved.
    pub fn add_favorite(&mut self, entry: FavoriteEntry) -> Result<bool, StoreError> {
        if self.is_favorite(&entry.id) {
            return Ok(false);
        }
        self.favorites.push(entry);
        write_list(&self.store, FAVORITES_KEY, &self.favorites)?;
        Ok(true)
    }

    /// Remove a favorite by id. Returns `Ok(false)` when it was not saved.
    pub fn remove_favorite(&mut self, id: &str) -> Result<bool, StoreError> {
        let before = self.favorites.len();
        self.favorites.retain(|f| f.id != id);
        if self.favorites.len() == before {
            return Ok(false);
        }
        write_list(&self.store, FAVORITES_KEY, &self.favorites)?;
        Ok(true)
    }

    /// Prepend a pick and cap the list
    pub fn record_history(&mut self, entry: HistoryEntry) -> Result<(), StoreError> {
        self.history.insert(0, entry);
        self.history.truncate(self.history_limit);
        write_list(&self.store, HISTORY_KEY, &self.history)
    }
}

fn read_list<T, S>(store: &S, key: &str) -> Result<Vec<T>, StoreError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get(key)? {
        // A stored `null` reads as an empty list
        Some(json) => Ok(serde_json::from_str::<Option<Vec<T>>>(&json)?.unwrap_or_default()),
        None => Ok(Vec::new()),
    }
}

fn write_list<T, S>(store: &S, key: &str, items: &[T]) -> Result<(), StoreError>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let json = serde_json::to_string(items)?;
    store.set(key, &json)
}

fn dedup_favorites(favorites: &mut Vec<FavoriteEntry>) {
    let mut seen = std::collections::HashSet::new();
    favorites.retain(|f| seen.insert(f.id.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::seed_restaurants;

    fn favorite(id: &str) -> FavoriteEntry {
        FavoriteEntry {
            id: id.to_string(),
            name: format!("Venue {}", id),
            rating: 4.0,
            cuisine: "Test".to_string(),
        }
    }

    #[test]
    fn test_add_favorite_is_idempotent() {
        let mut lists = SavedLists::load(MemoryStore::new(), 50);
        assert!(lists.add_favorite(favorite("w1")).unwrap());
        assert!(!lists.add_favorite(favorite("w1")).unwrap());
        assert!(!lists.add_favorite(favorite("w1")).unwrap());
        assert_eq!(lists.favorites().len(), 1);
    }

    #[test]
    fn test_remove_favorite() {
        let mut lists = SavedLists::load(MemoryStore::new(), 50);
        lists.add_favorite(favorite("w1")).unwrap();
        lists.add_favorite(favorite("w2")).unwrap();

        assert!(lists.remove_favorite("w1").unwrap());
        assert!(!lists.remove_favorite("w1").unwrap());
        assert_eq!(lists.favorites().len(), 1);
        assert_eq!(lists.favorites()[0].id, "w2");
    }

    #[test]
    fn test_history_prepends_and_caps() {
        let mut lists = SavedLists::load(MemoryStore::new(), 50);
        let seed = seed_restaurants();
        for i in 0..120 {
            lists.record_history(HistoryEntry::now(&seed[i % seed.len()])).unwrap();
        }
        assert_eq!(lists.history().len(), 50);
        // Entry 119 was recorded last: 119 % 12 = 11
        assert_eq!(lists.history()[0].id, "w12");
    }

    #[test]
    fn test_history_limit_never_exceeds_fifty() {
        let mut lists = SavedLists::load(MemoryStore::new(), 500);
        let seed = seed_restaurants();
        for i in 0..80 {
            lists.record_history(HistoryEntry::now(&seed[i % seed.len()])).unwrap();
        }
        assert_eq!(lists.history().len(), MAX_HISTORY_ENTRIES);
    }

    #[test]
    fn test_corrupt_store_loads_empty() {
        let store = MemoryStore::new();
        store.set(FAVORITES_KEY, "{not json").unwrap();
        store.set(HISTORY_KEY, r#"[{"id":"w1","name":"Uptown Pho","at":"2026-01-01T00:00:00Z"}]"#).unwrap();

        let lists = SavedLists::load(store, 50);
        assert!(lists.favorites().is_empty());
        assert!(lists.history().is_empty());
    }

    #[test]
    fn test_null_value_loads_empty() {
        let store = MemoryStore::new();
        store.set(FAVORITES_KEY, "null").unwrap();
        let lists = SavedLists::load(store, 50);
        assert!(lists.favorites().is_empty());
    }

    #[test]
    fn test_lists_survive_reload() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut lists = SavedLists::load(FileStore::open(dir.path()).unwrap(), 50);
            lists.add_favorite(favorite("w4")).unwrap();
            lists.record_history(HistoryEntry::now(&seed_restaurants()[3])).unwrap();
        }

        let lists = SavedLists::load(FileStore::open(dir.path()).unwrap(), 50);
        assert_eq!(lists.favorites()[0].id, "w4");
        assert_eq!(lists.history()[0].name, "Gaukel Ramen");
    }

    #[test]
    fn test_file_store_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(matches!(store.get("../etc"), Err(StoreError::InvalidKey(_))));
        assert_eq!(store.get("missing").unwrap(), None);
    }
}
