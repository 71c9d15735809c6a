//! Service error types with HTTP status code mapping.
//!
//! [`FlaskrError`] is the central error type. Each variant maps to an HTTP
//! status code; the [`IntoResponse`] impl renders a small HTML error page
//! so a failure never reaches the client as an unhandled fault.

use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::views;

/// Server-side error enum with HTTP status code mapping.
///
/// | Variant           | HTTP Status               |
/// |-------------------|---------------------------|
/// | `InvalidUsername` | 200 (re-rendered form)    |
/// | `InvalidPassword` | 200 (re-rendered form)    |
/// | `BadRequest`      | 400 Bad Request           |
/// | `Unauthorized`    | 401 Unauthorized          |
/// | `Storage`         | 500 Internal Server Error |
/// | `Config`          | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum FlaskrError {
    /// Submitted username does not match the configured one.
    #[error("Invalid username")]
    InvalidUsername,

    /// Username matched but the password did not.
    #[error("Invalid password")]
    InvalidPassword,

    /// Submitted form could not be decoded.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Operation requires a logged-in session.
    #[error("Please log in.")]
    Unauthorized,

    /// Any failure raised by the entry store.
    #[error("storage error: {0}")]
    Storage(String),

    /// Invalid startup configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl FlaskrError {
    /// Returns `true` for the two credential mismatch variants, which
    /// are reported inline on the login form rather than as an error page.
    #[must_use]
    pub const fn is_login_failure(&self) -> bool {
        matches!(self, Self::InvalidUsername | Self::InvalidPassword)
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidUsername | Self::InvalidPassword => StatusCode::OK,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Storage(_) | Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for FlaskrError {
    fn from(err: sqlx::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<FormRejection> for FlaskrError {
    fn from(rejection: FormRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for FlaskrError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }
        let body = views::error_page(status, &self.to_string());
        (status, Html(body)).into_response()
    }
}
