//! Per-client session state.
//!
//! [`SessionState`] is the only state a client carries between requests:
//! whether it is logged in, and the flash messages queued for the next
//! rendered page. It never touches the entry store.

use serde::{Deserialize, Serialize};

/// Most flash messages a session keeps; older ones are dropped first.
pub const MAX_FLASHES: usize = 10;

/// Authentication state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// Initial state; Add and Delete are refused.
    Anonymous,
    /// Entered on successful login, left on logout.
    Authenticated,
}

/// Serializable session contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Whether the client has logged in.
    #[serde(default)]
    pub logged_in: bool,
    /// One-shot messages shown on the next rendered page.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flashes: Vec<String>,
}

impl SessionState {
    /// Current authentication state.
    #[must_use]
    pub const fn auth_state(&self) -> AuthState {
        if self.logged_in {
            AuthState::Authenticated
        } else {
            AuthState::Anonymous
        }
    }

    /// Transitions to [`AuthState::Authenticated`].
    pub fn log_in(&mut self) {
        self.logged_in = true;
    }

    /// Transitions to [`AuthState::Anonymous`]. Idempotent.
    pub fn log_out(&mut self) {
        self.logged_in = false;
    }

    /// Queues a flash message, keeping at most [`MAX_FLASHES`].
    pub fn flash(&mut self, message: impl Into<String>) {
        self.flashes.push(message.into());
        let excess = self.flashes.len().saturating_sub(MAX_FLASHES);
        if excess > 0 {
            self.flashes.drain(..excess);
        }
    }

    /// Removes and returns all queued flash messages.
    pub fn take_flashes(&mut self) -> Vec<String> {
        std::mem::take(&mut self.flashes)
    }
}
