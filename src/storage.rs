//! Local key/value persistence.
//!
//! Favorites and the theme preference each live under one fixed key.
//! [`JsonFileStore`] keeps every key in a single JSON object on disk;
//! [`MemoryStore`] keeps them in memory for `--no-persist` runs and tests.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fs2::FileExt;
use parking_lot::Mutex;
use thiserror::Error;

/// Errors from the local key/value store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O failed for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage file '{path}' is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// String key/value store.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// All keys in one JSON object file.
///
/// Every `set` re-reads the file under an exclusive lock, so separate
/// store instances pointing at the same file do not drop each other's keys.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new())
            }
            Err(err) => return Err(self.io_error(err)),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(map).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        let tmp_path = self.path.with_extension("json.tmp");
        let mut tmp = File::create(&tmp_path).map_err(|e| self.io_error(e))?;
        tmp.write_all(json.as_bytes()).map_err(|e| self.io_error(e))?;
        tmp.sync_all().map_err(|e| self.io_error(e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| self.io_error(e))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let lock_path = self.path.with_extension("lock");
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|e| self.io_error(e))?;
        lock.lock_exclusive().map_err(|e| self.io_error(e))?;

        // A corrupt file is replaced rather than blocking every future write.
        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(StorageError::Corrupt { .. }) => BTreeMap::new(),
            Err(err) => return Err(err),
        };
        map.insert(key.to_string(), value.to_string());
        let result = self.write_map(&map);

        let _ = FileExt::unlock(&lock);
        result
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    entries: BTreeMap<String, String>,
    writes: usize,
}

/// In-memory store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .inner
            .lock()
            .entries
            .insert(key.to_string(), value.to_string());
        store
    }

    /// Number of `set` calls made so far.
    pub fn writes(&self) -> usize {
        self.inner.lock().writes
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.lock().entries.get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.inner.lock().entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut inner = self.inner.lock();
        inner.writes += 1;
        inner.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
