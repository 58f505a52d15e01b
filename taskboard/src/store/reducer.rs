//! The action protocol and the pure transition function.

use std::sync::Arc;

use taskboard_proto::task::{Task, TaskId};
use taskboard_proto::user::User;

use super::snapshot::{RosterStatus, Snapshot};

/// A request to change store state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Replace the task list wholesale (hydration from storage).
    SetTasks(Vec<Task>),
    /// Append a task. The caller assigns a unique ID.
    AddTask(Task),
    /// Replace the task with the same ID, keeping its position.
    UpdateTask(Task),
    /// Remove the task with this ID.
    DeleteTask(TaskId),
    /// Replace the roster wholesale.
    SetUsers(Vec<User>),
    /// Start (`true`) or finish (`false`) a roster fetch.
    SetLoading(bool),
    /// Record a roster fetch failure.
    SetError(String),
}

impl Action {
    /// Short name for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SetTasks(_) => "set_tasks",
            Self::AddTask(_) => "add_task",
            Self::UpdateTask(_) => "update_task",
            Self::DeleteTask(_) => "delete_task",
            Self::SetUsers(_) => "set_users",
            Self::SetLoading(_) => "set_loading",
            Self::SetError(_) => "set_error",
        }
    }
}

/// Computes the snapshot that follows `snapshot` after `action`.
///
/// Total over all inputs: updating or deleting an unknown ID returns a
/// snapshot that shares the previous task list.
#[must_use]
pub fn apply(snapshot: &Snapshot, action: Action) -> Snapshot {
    let mut next = snapshot.clone();
    match action {
        Action::SetTasks(tasks) => next.tasks = tasks.into(),
        Action::AddTask(task) => {
            let mut tasks = Vec::with_capacity(snapshot.tasks.len() + 1);
            tasks.extend_from_slice(&snapshot.tasks);
            tasks.push(task);
            next.tasks = tasks.into();
        }
        Action::UpdateTask(task) => {
            if let Some(pos) = position(&snapshot.tasks, &task.id) {
                let mut tasks = snapshot.tasks.to_vec();
                tasks[pos] = task;
                next.tasks = tasks.into();
            }
        }
        Action::DeleteTask(id) => {
            if let Some(pos) = position(&snapshot.tasks, &id) {
                let mut tasks = snapshot.tasks.to_vec();
                tasks.remove(pos);
                next.tasks = tasks.into();
            }
        }
        Action::SetUsers(users) => next.users = Arc::from(users),
        Action::SetLoading(true) => next.roster = RosterStatus::Loading,
        Action::SetLoading(false) => {
            if next.roster == RosterStatus::Loading {
                next.roster = RosterStatus::Ready;
            }
        }
        Action::SetError(message) => next.roster = RosterStatus::Failed(message),
    }
    next
}

fn position(tasks: &[Task], id: &TaskId) -> Option<usize> {
    tasks.iter().position(|t| &t.id == id)
}
