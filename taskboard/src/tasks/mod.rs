//! Task drafting and submission validation.
//!
//! A [`TaskDraft`] is the editable form state behind "create task" and
//! "edit task". Validation happens here, before anything reaches the store:
//! the store trusts every task it is handed.

pub mod draft;

pub use draft::TaskDraft;

use thiserror::Error;

/// Default maximum task title length in characters.
pub const MAX_TASK_TITLE_LENGTH: usize = 256;

/// Reasons a draft cannot be submitted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    /// Task title cannot be empty.
    #[error("Title is required")]
    TitleEmpty,
    /// Task title exceeds the maximum length.
    #[error("Title is too long (max {0} characters)")]
    TitleTooLong(usize),
    /// No priority was chosen.
    #[error("Priority is required")]
    PriorityUnset,
    /// No status was chosen.
    #[error("Status is required")]
    StatusUnset,
}
