//! Shared entity definitions for Taskboard.
//!
//! Tasks, users, and the JSON codec used both for the local storage slot
//! and for decoding the remote user roster.

pub mod codec;
pub mod task;
pub mod user;
