//! Key-value store implementations.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error_handling::StoreError;

/// String key-value storage with write-through semantics.
///
/// Calls are synchronous; implementations must not block for long since they
/// run on the controller's thread of control.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::LockPoisoned)?;
        entries.remove(key);
        Ok(())
    }
}

/// Store backed by one JSON object of strings on disk.
///
/// The file is read once in [`open`](JsonFileStore::open) and rewritten in
/// full after every `set` or `remove`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file exists but cannot be read, and
    /// `StoreError::Serialization` if it is not a JSON object of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        log::debug!("Opened store {} ({} keys)", path.display(), entries.len());
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// An empty store that will write to `path`, ignoring what is there now.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::LockPoisoned)?;
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("theme").unwrap(), None);
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
        store.remove("theme").unwrap();
        assert_eq!(store.get("theme").unwrap(), None);
        // Removing a missing key is fine
        store.remove("theme").unwrap();
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path().join("state.json")).unwrap();
        assert_eq!(store.get("searchHistory").unwrap(), None);
        // Nothing is written until the first mutation
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_store_writes_through() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let store = JsonFileStore::open(&path).unwrap();
        store.set("theme", "light").unwrap();
        assert!(path.exists());

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("light"));

        reopened.remove("theme").unwrap();
        let again = JsonFileStore::open(&path).unwrap();
        assert_eq!(again.get("theme").unwrap(), None);
    }

    #[test]
    fn test_file_store_rejects_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(matches!(
            JsonFileStore::open(&path),
            Err(StoreError::Serialization(_))
        ));
    }

    #[test]
    fn test_file_store_empty_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "  \n").unwrap();
        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("theme").unwrap(), None);
    }
}
