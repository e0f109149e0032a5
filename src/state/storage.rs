//! Local key/value storage for persisted client state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Plays the role browser `localStorage` plays for a web client: string
//! values under string keys, read once at startup and rewritten on change.
//! `MemoryStorage` keeps test instances isolated; `FileStorage` writes one
//! `<key>.json` file per key under a state directory.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io failed for {key}: {source}")]
    Io { key: String, source: io::Error },

    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("storage lock poisoned")]
    Poisoned,

    #[error("stored value for {key} is not valid JSON: {source}")]
    Json { key: String, source: serde_json::Error },
}

/// Synchronous string key/value store.
pub trait Storage: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Load a JSON value stored under `key`. `Ok(None)` when the key is absent.
///
/// # Errors
///
/// Returns an error if the backend fails or the stored text is not valid JSON for `T`.
pub fn load_json<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Result<Option<T>, StorageError> {
    let Some(raw) = storage.get_item(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Json { key: key.to_owned(), source })
}

/// Save `value` as JSON under `key`.
///
/// # Errors
///
/// Returns an error if serialization or the backend write fails.
pub fn save_json<T: Serialize>(storage: &dyn Storage, key: &str, value: &T) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Json { key: key.to_owned(), source })?;
    storage.set_item(key, &raw)
}

// =============================================================================
// MEMORY
// =============================================================================

/// In-process storage; every instance is independent.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        items.remove(key);
        Ok(())
    }
}

// =============================================================================
// FILE
// =============================================================================

/// Directory-backed storage: `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { key: key.to_owned(), source }),
        }
    }

    /// Write to a sibling temp file, then rename over `<key>.json`, so a
    /// crash mid-write never leaves a truncated record behind.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let io_err = |source| StorageError::Io { key: key.to_owned(), source };
        fs::create_dir_all(&self.dir).map_err(io_err)?;

        let temp_path = self.dir.join(format!(".{key}.{}.tmp", std::process::id()));
        fs::write(&temp_path, value).map_err(io_err)?;
        if let Err(source) = fs::rename(&temp_path, &path) {
            if let Err(e) = fs::remove_file(&temp_path) {
                tracing::warn!(path = %temp_path.display(), error = %e, "failed to remove temp state file");
            }
            return Err(io_err(source));
        }
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { key: key.to_owned(), source }),
        }
    }
}
