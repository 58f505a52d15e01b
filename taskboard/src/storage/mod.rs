//! Durable key-value storage for the task list.
//!
//! Defines the [`KeyValueStorage`] trait, a file-backed implementation for
//! real sessions, an in-memory one for tests, and [`TaskPersistence`],
//! which reads and writes the task list under a single key while
//! swallowing every storage failure.

pub mod tasks;

pub use tasks::{DEFAULT_STORAGE_KEY, TaskPersistence};

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The key cannot be used as a slot name.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// A read operation failed.
    #[error("read failed for {path}: {source}")]
    ReadFailed {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A write operation failed.
    #[error("write failed for {path}: {source}")]
    WriteFailed {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Checks that `key` can name a slot file: non-empty ASCII letters,
/// digits, `-`, `_` or `.`, and not starting with `.`.
///
/// # Errors
///
/// Returns [`StorageError::InvalidKey`] otherwise.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

/// A set of named string slots that survive process restarts.
pub trait KeyValueStorage: Send + Sync {
    /// Returns the value stored under `key`, or `None` if the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the slot exists but cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrites the slot under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the value cannot be stored.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go to a temporary file in the same directory which is then
/// renamed over the slot, so a crash mid-write leaves the old value intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates a storage rooted at `dir`. The directory is created lazily
    /// on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the slots.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::ReadFailed { path, source }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        let write_failed = |source| StorageError::WriteFailed {
            path: path.clone(),
            source,
        };

        std::fs::create_dir_all(&self.dir).map_err(write_failed)?;
        let written = write_file(&tmp, value).and_then(|()| std::fs::rename(&tmp, &path));
        if let Err(source) = written {
            // Leave no partial temp file behind.
            if let Err(e) = std::fs::remove_file(&tmp)
                && e.kind() != std::io::ErrorKind::NotFound
            {
                tracing::warn!(path = %tmp.display(), error = %e, "failed to remove temp file");
            }
            return Err(write_failed(source));
        }
        Ok(())
    }
}

fn write_file(path: &Path, value: &str) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(value.as_bytes())?;
    file.sync_all()
}

/// In-memory implementation of [`KeyValueStorage`].
///
/// Not persistent: all data is lost when the value is dropped. Used by tests
/// and by sessions started without a data directory.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl InMemoryStorage {
    /// Create a new, empty in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for InMemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
