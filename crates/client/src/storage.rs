use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

use wishwall_core::domain::liked::LikedSet;

/// Versioned so that a future format change can tell old data apart.
pub const LIKED_KEY: &str = "wishwall_liked_v1";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage lock poisoned")]
    Poisoned,
}

/// String key/value storage local to one visitor, with the same shape as a
/// browser's local storage.
pub trait LocalStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        items.remove(key);
        Ok(())
    }
}

/// Local storage kept as a single JSON object on disk.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    fn read_items(&self) -> Result<Map<String, Value>, StorageError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => return Err(err.into()),
        };
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    fn write_items(&self, items: &Map<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(items)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl LocalStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.guard.lock().map_err(|_| StorageError::Poisoned)?;
        let items = self.read_items()?;
        Ok(items
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.guard.lock().map_err(|_| StorageError::Poisoned)?;
        let mut items = self.read_items()?;
        items.insert(key.to_string(), Value::String(value.to_string()));
        self.write_items(&items)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.guard.lock().map_err(|_| StorageError::Poisoned)?;
        let mut items = self.read_items()?;
        if items.remove(key).is_some() {
            self.write_items(&items)?;
        }
        Ok(())
    }
}

/// Reads and writes the liked-set under [`LIKED_KEY`].
#[derive(Debug)]
pub struct LikedStore<S> {
    storage: S,
}

impl<S: LocalStorage> LikedStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Missing or unreadable data yields an empty set.
    pub fn read(&self) -> LikedSet {
        let raw = match self.storage.get_item(LIKED_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return LikedSet::default(),
            Err(err) => {
                warn!(error = %err, "failed to read liked set");
                return LikedSet::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(liked) => liked,
            Err(err) => {
                warn!(error = %err, "stored liked set is malformed; starting empty");
                LikedSet::default()
            }
        }
    }

    pub fn write(&self, liked: &LikedSet) -> Result<(), StorageError> {
        let raw = serde_json::to_string(liked)?;
        self.storage.set_item(LIKED_KEY, &raw)
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove_item(LIKED_KEY)
    }

    #[cfg(test)]
    pub(crate) fn into_storage(self) -> S {
        self.storage
    }
}
