//! Entry, login, and search DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Form body for `POST /add`.
#[derive(Debug, Deserialize)]
pub struct NewEntryForm {
    /// Entry title, stored verbatim.
    pub title: String,
    /// Entry text, stored verbatim.
    pub text: String,
}

/// Form body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Submitted username.
    pub username: String,
    /// Submitted password.
    pub password: String,
}

/// Query string for `GET /search`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Substring to look for in titles and texts.
    #[serde(default)]
    pub query: Option<String>,
}

/// JSON envelope returned by `GET /delete/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusEnvelope {
    /// `1` on success, `0` on failure.
    pub status: u8,
    /// Human-readable outcome.
    pub message: String,
}

impl StatusEnvelope {
    /// Success envelope.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: 1,
            message: message.into(),
        }
    }

    /// Failure envelope.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: 0,
            message: message.into(),
        }
    }
}
