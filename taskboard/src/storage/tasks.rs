//! Best-effort persistence of the task list.

use taskboard_proto::codec;
use taskboard_proto::task::Task;

use super::KeyValueStorage;

/// Slot name used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "tasks";

/// Reads and writes the task list under one storage key.
///
/// Neither operation fails: a missing or unreadable slot reads as an empty
/// list, and a failed write is logged and dropped. The in-memory store
/// stays authoritative either way.
pub struct TaskPersistence {
    storage: Box<dyn KeyValueStorage>,
    key: String,
}

impl TaskPersistence {
    /// Wraps `storage`, using the slot named `key`.
    #[must_use]
    pub fn new(storage: Box<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Slot name this persistence reads and writes.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Loads the saved task list.
    #[must_use]
    pub fn read(&self) -> Vec<Task> {
        let text = match self.storage.get(&self.key) {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no saved tasks");
                return Vec::new();
            }
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "could not read saved tasks");
                return Vec::new();
            }
        };

        match codec::decode_tasks(&text) {
            Ok(tasks) => {
                tracing::info!(key = %self.key, count = tasks.len(), "loaded saved tasks");
                tasks
            }
            Err(err) => {
                tracing::warn!(
                    key = %self.key,
                    error = %err,
                    "saved tasks are corrupt, starting empty"
                );
                Vec::new()
            }
        }
    }

    /// Overwrites the slot with `tasks`.
    pub fn write(&self, tasks: &[Task]) {
        let text = match codec::encode_tasks(tasks) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "could not encode tasks");
                return;
            }
        };

        if let Err(err) = self.storage.set(&self.key, &text) {
            tracing::warn!(
                key = %self.key,
                error = %err,
                "task save failed, changes kept in memory only"
            );
        }
    }
}
