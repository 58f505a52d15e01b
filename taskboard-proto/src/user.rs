//! Roster user types.

use serde::{Deserialize, Serialize};

/// Numeric identifier of a roster user, as assigned by the remote source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Wraps a raw roster ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw roster ID.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An assignable user loaded from the remote roster.
///
/// Only `id` and `name` are required. The remote record usually carries
/// more (address, company, ...); anything not listed here is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Roster identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login handle, if the roster provides one.
    #[serde(default)]
    pub username: Option<String>,
    /// Contact email, if the roster provides one.
    #[serde(default)]
    pub email: Option<String>,
}

impl User {
    /// Creates a user with only the required fields.
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: UserId::new(id),
            name: name.into(),
            username: None,
            email: None,
        }
    }
}
