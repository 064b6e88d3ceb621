//! Key-value persistence with JSON-encoded values.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use termfolio_types::error::{FolioError, Result};

/// String-keyed storage for small JSON-serialized values.
pub trait KeyValueStore {
    /// Raw stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: String) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;

    /// Drop every key.
    fn clear(&mut self) -> Result<()>;
}

/// Read and decode `key`. Absent keys and malformed values both yield
/// `None`; malformed values are logged.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring malformed stored value for '{key}': {e}");
            None
        },
    }
}

/// Encode `value` as JSON and store it under `key`.
pub fn save_json<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, raw)
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// A store that forgets everything when dropped.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// File-backed store
// ---------------------------------------------------------------------------

/// A store persisted as a single JSON object on disk.
///
/// The whole file is rewritten on every mutation; the data set is a handful
/// of short keys.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`. A missing file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let text = std::fs::read_to_string(&path)?;
            if text.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&text).map_err(|e| {
                    FolioError::Storage(format!("corrupt store {}: {e}", path.display()))
                })?
            }
        } else {
            BTreeMap::new()
        };
        log::debug!("Opened store {} ({} keys)", path.display(), entries.len());
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir)?;
        }
        let text = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        if self.entries.get(key) == Some(&value) {
            return Ok(());
        }
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_round_trip() {
        let mut store = MemoryStore::new();
        save_json(&mut store, "terminal-sound", &false).unwrap();
        assert_eq!(store.get("terminal-sound").as_deref(), Some("false"));
        assert_eq!(load_json::<bool>(&store, "terminal-sound"), Some(false));
    }

    #[test]
    fn load_missing_is_none() {
        let store = MemoryStore::new();
        assert_eq!(load_json::<u32>(&store, "terminal-speed"), None);
    }

    #[test]
    fn load_malformed_is_none() {
        let mut store = MemoryStore::new();
        store.set("terminal-speed", "fast".to_string()).unwrap();
        assert_eq!(load_json::<u32>(&store, "terminal-speed"), None);
    }

    #[test]
    fn memory_clear_and_remove() {
        let mut store = MemoryStore::new();
        store.set("a", "1".into()).unwrap();
        store.set("b", "2".into()).unwrap();
        store.remove("a").unwrap();
        assert_eq!(store.len(), 1);
        store.clear().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn file_store_persists_across_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("store.json");
        {
            let mut store = FileStore::open(&path).unwrap();
            save_json(&mut store, "terminal-history", &vec!["ls", "pwd"]).unwrap();
        }
        let store = FileStore::open(&path).unwrap();
        let history: Vec<String> = load_json(&store, "terminal-history").unwrap();
        assert_eq!(history, vec!["ls", "pwd"]);
    }

    #[test]
    fn file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("none.json")).unwrap();
        assert_eq!(store.get("anything"), None);
    }

    #[test]
    fn file_store_corrupt_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = FileStore::open(&path).unwrap_err();
        assert!(matches!(err, FolioError::Storage(_)));
    }

    #[test]
    fn file_store_clear_empties_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let mut store = FileStore::open(&path).unwrap();
        store.set("rps-score", "{}".into()).unwrap();
        store.clear().unwrap();
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("rps-score"), None);
    }
}
