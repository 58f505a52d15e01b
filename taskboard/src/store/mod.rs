//! The authoritative task store.
//!
//! [`Store`] is a cheap-to-clone handle around a single [`Snapshot`].
//! Every [`Action`] is applied under one lock, in dispatch order, through
//! the pure [`apply`] function; the result replaces the previous snapshot
//! wholesale. When the store carries a [`TaskPersistence`], every dispatch
//! that produces a new task list writes it through immediately.

pub mod reducer;
pub mod snapshot;

pub use reducer::{Action, apply};
pub use snapshot::{RosterStatus, Snapshot, UNASSIGNED_LABEL, UNKNOWN_USER_LABEL};

use std::sync::Arc;

use parking_lot::Mutex;
use taskboard_proto::task::Task;
use tokio::sync::watch;

use crate::storage::TaskPersistence;

/// Generation stamp for one roster load.
///
/// Only the most recently issued ticket may publish roster results, so a
/// slow earlier fetch cannot overwrite a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterTicket(u64);

/// Shared handle to the task store.
///
/// Presentation code reads [`snapshot`](Self::snapshot) and calls
/// [`dispatch`](Self::dispatch); it never mutates tasks directly.
#[derive(Clone)]
pub struct Store {
    shared: Arc<Shared>,
}

struct Shared {
    state: Mutex<State>,
    updates: watch::Sender<Arc<Snapshot>>,
}

struct State {
    snapshot: Arc<Snapshot>,
    persistence: Option<TaskPersistence>,
    /// Task list last handed to `persistence` (or seeded from it).
    persisted: Arc<[Task]>,
    roster_generation: u64,
}

impl Store {
    /// Creates an in-memory store with no persistence.
    #[must_use]
    pub fn new(initial: Snapshot) -> Self {
        Self::build(initial, None)
    }

    /// Creates a store that writes every task-list change to `persistence`.
    ///
    /// The initial task list is assumed to have come from `persistence`
    /// and is not written back.
    #[must_use]
    pub fn with_persistence(initial: Snapshot, persistence: TaskPersistence) -> Self {
        Self::build(initial, Some(persistence))
    }

    fn build(initial: Snapshot, persistence: Option<TaskPersistence>) -> Self {
        let snapshot = Arc::new(initial);
        let (updates, _) = watch::channel(Arc::clone(&snapshot));
        let state = State {
            persisted: Arc::clone(&snapshot.tasks),
            snapshot,
            persistence,
            roster_generation: 0,
        };
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                updates,
            }),
        }
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.shared.state.lock().snapshot)
    }

    /// Subscribes to snapshot changes.
    ///
    /// The receiver always holds the latest snapshot; intermediate ones may
    /// be skipped by slow readers.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.shared.updates.subscribe()
    }

    /// Applies an action.
    pub fn dispatch(&self, action: Action) {
        let mut state = self.shared.state.lock();
        self.commit(&mut state, action);
    }

    /// Issues a new roster ticket and marks the roster as loading.
    ///
    /// Any ticket issued earlier becomes stale.
    #[must_use]
    pub fn begin_roster_load(&self) -> RosterTicket {
        let mut state = self.shared.state.lock();
        state.roster_generation += 1;
        let ticket = RosterTicket(state.roster_generation);
        self.commit(&mut state, Action::SetLoading(true));
        ticket
    }

    /// Applies a roster action on behalf of `ticket`.
    ///
    /// Returns `false` and drops the action if a newer load has started.
    pub fn dispatch_roster(&self, ticket: RosterTicket, action: Action) -> bool {
        let mut state = self.shared.state.lock();
        if ticket.0 != state.roster_generation {
            tracing::debug!(
                ticket = ticket.0,
                current = state.roster_generation,
                action = action.kind(),
                "dropping stale roster action"
            );
            return false;
        }
        self.commit(&mut state, action);
        true
    }

    fn commit(&self, state: &mut State, action: Action) {
        let kind = action.kind();
        let next = Arc::new(apply(&state.snapshot, action));

        if !Arc::ptr_eq(&next.tasks, &state.persisted) {
            if let Some(persistence) = &state.persistence {
                persistence.write(&next.tasks);
            }
            state.persisted = Arc::clone(&next.tasks);
        }

        tracing::debug!(
            action = kind,
            tasks = next.tasks.len(),
            users = next.users.len(),
            "store updated"
        );

        state.snapshot = Arc::clone(&next);
        self.shared.updates.send_replace(next);
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(Snapshot::default())
    }
}
