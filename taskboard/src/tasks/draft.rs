//! Editable task form state.

use taskboard_proto::task::{Priority, Status, Task, TaskId};
use taskboard_proto::user::UserId;

use super::TaskError;
use crate::store::Action;

/// Form state for creating a new task or editing an existing one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    /// Title as typed.
    pub title: String,
    /// Description as typed.
    pub description: String,
    /// Chosen priority.
    pub priority: Option<Priority>,
    /// Chosen status.
    pub status: Option<Status>,
    /// Chosen assignee.
    pub assignee: Option<UserId>,
    editing: Option<TaskId>,
}

impl TaskDraft {
    /// An empty draft for a new task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A draft pre-filled from `task`; submitting it updates that task.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            status: task.status,
            assignee: task.assignee,
            editing: Some(task.id.clone()),
        }
    }

    /// ID of the task being edited, if any.
    #[must_use]
    pub const fn editing(&self) -> Option<&TaskId> {
        self.editing.as_ref()
    }

    /// Checks the draft without consuming it.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: blank title, title longer than
    /// `max_title_len` characters, unset priority, unset status.
    pub fn validate(&self, max_title_len: usize) -> Result<(), TaskError> {
        if self.title.trim().is_empty() {
            return Err(TaskError::TitleEmpty);
        }
        if self.title.chars().count() > max_title_len {
            return Err(TaskError::TitleTooLong(max_title_len));
        }
        if self.priority.is_none() {
            return Err(TaskError::PriorityUnset);
        }
        if self.status.is_none() {
            return Err(TaskError::StatusUnset);
        }
        Ok(())
    }

    /// Builds the store action for this draft.
    ///
    /// New drafts become [`Action::AddTask`] with a freshly generated ID;
    /// drafts opened with [`from_task`](Self::from_task) become
    /// [`Action::UpdateTask`] for the original ID.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError`] if [`validate`](Self::validate) fails.
    pub fn submit(&self, max_title_len: usize) -> Result<Action, TaskError> {
        self.validate(max_title_len)?;
        let task = Task {
            id: self.editing.clone().unwrap_or_else(TaskId::generate),
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
            status: self.status,
            assignee: self.assignee,
        };
        Ok(if self.editing.is_some() {
            Action::UpdateTask(task)
        } else {
            Action::AddTask(task)
        })
    }
}
