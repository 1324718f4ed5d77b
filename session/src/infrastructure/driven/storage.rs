use anyhow::{Context, Result};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

use crate::application::errors::StorageError;
use crate::application::ports::LocalStore;

/// In-memory store, used when no durable storage is wanted
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.lock().map_err(|_| poisoned())?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().map_err(|_| poisoned())?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Key-value store persisted as a flat JSON object.
///
/// The whole file is rewritten on every `set`; it only ever holds a handful
/// of keys.
pub struct FileStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// `<data_dir>/focus/storage.json`, or `./focus/storage.json` when the
    /// platform has no data directory.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("focus")
            .join("storage.json")
    }

    /// Opens the store at `path`. A missing file starts empty; an unreadable
    /// one is logged and replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(values) => values,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Discarding corrupt local store");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()));
            }
        };
        debug!(path = %path.display(), keys = values.len(), "Opened local store");
        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(values)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

impl LocalStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.lock().map_err(|_| poisoned())?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().map_err(|_| poisoned())?;
        let previous = values.insert(key.to_string(), value.to_string());
        if let Err(e) = self.persist(&values) {
            // keep memory and disk in agreement
            match previous {
                Some(old) => values.insert(key.to_string(), old),
                None => values.remove(key),
            };
            return Err(StorageError(format!("{:#}", e)));
        }
        Ok(())
    }
}

fn poisoned() -> StorageError {
    StorageError("store lock poisoned".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("focus-store-{}", uuid::Uuid::new_v4()))
            .join("storage.json")
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let store = FileStore::open(scratch_path()).unwrap();
        assert_eq!(store.get("focus:name").unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let path = scratch_path();
        {
            let store = FileStore::open(&path).unwrap();
            store.set("focus:name", "Ada Lovelace").unwrap();
            store.set("focus:profileImage", "null").unwrap();
        }

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("focus:name").unwrap().as_deref(), Some("Ada Lovelace"));
        assert_eq!(reopened.get("focus:profileImage").unwrap().as_deref(), Some("null"));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_corrupt_file_is_discarded() {
        let path = scratch_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("focus:name").unwrap(), None);
        store.set("focus:name", "Grace").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("focus:name").unwrap().as_deref(), Some("Grace"));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_memory_store_overwrites() {
        let store = MemoryStore::new();
        store.set("k", "a").unwrap();
        store.set("k", "b").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("b"));
    }
}
