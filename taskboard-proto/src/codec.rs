//! JSON encoding for the task storage slot and the roster body.
//!
//! The storage slot holds a JSON array of [`Task`] records; the roster
//! endpoint returns a JSON array of [`User`] records.

use crate::task::Task;
use crate::user::User;

/// Error type for codec encode/decode operations.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Encodes a task sequence as a JSON array.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if a task cannot be serialized.
pub fn encode_tasks(tasks: &[Task]) -> Result<String, CodecError> {
    Ok(serde_json::to_string(tasks)?)
}

/// Decodes a task sequence from a JSON array.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the text is not a JSON array of
/// task records.
pub fn decode_tasks(text: &str) -> Result<Vec<Task>, CodecError> {
    Ok(serde_json::from_str(text)?)
}

/// Decodes a roster response body.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the body is not a JSON array of
/// user records with at least `id` and `name`.
pub fn decode_users(body: &str) -> Result<Vec<User>, CodecError> {
    Ok(serde_json::from_str(body)?)
}
