//! Immutable store snapshots.

use std::sync::Arc;

use taskboard_proto::task::{Task, TaskId};
use taskboard_proto::user::{User, UserId};

/// Label shown for a task with no assignee.
pub const UNASSIGNED_LABEL: &str = "Unassigned";

/// Label shown for an assignee ID missing from the roster.
pub const UNKNOWN_USER_LABEL: &str = "Unknown user";

/// Lifecycle of the roster fetch. Exactly one state holds at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterStatus {
    /// A fetch is in flight (also the state before the first fetch ends).
    Loading,
    /// The roster has been loaded.
    Ready,
    /// The last fetch failed with a user-facing message.
    Failed(String),
}

/// A point-in-time view of the store.
///
/// Snapshots are never mutated after publication. Task and user sequences
/// are shared between consecutive snapshots when an action leaves them
/// untouched, so [`Arc::ptr_eq`] on [`Snapshot::tasks`] tells whether the
/// task list changed.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Tasks in insertion order.
    pub tasks: Arc<[Task]>,
    /// The current roster.
    pub users: Arc<[User]>,
    /// Roster fetch state.
    pub roster: RosterStatus,
}

impl Snapshot {
    /// Creates an initial snapshot seeded with `tasks`, an empty roster, and
    /// roster status [`RosterStatus::Loading`].
    #[must_use]
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: tasks.into(),
            users: Vec::new().into(),
            roster: RosterStatus::Loading,
        }
    }

    /// Looks up a roster user by ID.
    #[must_use]
    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Display name for a task's assignee, falling back to
    /// [`UNASSIGNED_LABEL`] or [`UNKNOWN_USER_LABEL`].
    #[must_use]
    pub fn assignee_name(&self, task: &Task) -> &str {
        match task.assignee {
            None => UNASSIGNED_LABEL,
            Some(id) => self.user(id).map_or(UNKNOWN_USER_LABEL, |u| u.name.as_str()),
        }
    }

    /// Looks up a task by ID.
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::with_tasks(Vec::new())
    }
}
