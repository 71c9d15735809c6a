//! Type-safe entry identifier.
//!
//! [`EntryId`] is a newtype wrapper around the store-assigned `i64` row id
//! so entry ids cannot be confused with other integers in handler code.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a stored blog entry.
///
/// Assigned by the store at insert time, never by the client. Ids are
/// monotonic: a later insert always receives a larger id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(i64);

impl EntryId {
    /// Wraps a raw row id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw row id.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EntryId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<EntryId> for i64 {
    fn from(id: EntryId) -> Self {
        id.0
    }
}
