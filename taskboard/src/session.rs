//! Wires persistence and the roster loader into a store.
//!
//! A [`Session`] owns the lifecycle of one store: it seeds the task list
//! from storage, turns on write-through persistence, and starts the roster
//! load exactly once. The two are independent; a slow or failing roster
//! never delays the saved tasks.

use tokio::task::JoinHandle;

use crate::config::ClientConfig;
use crate::roster::{self, HttpRosterSource, RosterError, RosterSource};
use crate::storage::{FileStorage, TaskPersistence};
use crate::store::{Snapshot, Store};

/// A running store with its background roster load.
pub struct Session {
    store: Store,
    roster_load: Option<JoinHandle<()>>,
}

impl Session {
    /// Starts a session from explicit collaborators.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<S>(persistence: TaskPersistence, roster_source: S) -> Self
    where
        S: RosterSource + 'static,
    {
        let tasks = persistence.read();
        tracing::info!(
            key = persistence.key(),
            tasks = tasks.len(),
            "starting session"
        );
        let store = Store::with_persistence(Snapshot::with_tasks(tasks), persistence);
        let roster_load = roster::spawn_roster_load(store.clone(), roster_source);
        Self {
            store,
            roster_load: Some(roster_load),
        }
    }

    /// Starts a session backed by file storage and the HTTP roster.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Client`] if the HTTP client cannot be built.
    pub fn open(config: &ClientConfig) -> Result<Self, RosterError> {
        let source = HttpRosterSource::new(config.roster_url.clone(), config.roster_timeout)?;
        let storage = FileStorage::new(&config.data_dir);
        tracing::debug!(
            data_dir = %storage.dir().display(),
            roster_url = %source.url(),
            "opening session"
        );
        let persistence = TaskPersistence::new(Box::new(storage), config.storage_key.clone());
        Ok(Self::start(persistence, source))
    }

    /// The session's store handle.
    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    /// Whether the roster load has finished (successfully or not).
    #[must_use]
    pub fn roster_settled(&self) -> bool {
        self.roster_load.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Waits for the roster load to finish. Returns immediately if it
    /// has already been awaited.
    pub async fn wait_for_roster(&mut self) {
        if let Some(handle) = self.roster_load.take()
            && let Err(err) = handle.await
        {
            tracing::warn!(error = %err, "roster load task ended abnormally");
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(handle) = &self.roster_load {
            handle.abort();
        }
    }
}
