//! Login guards composed onto routes as middleware.
//!
//! Two refusal styles exist per endpoint: form posts abort with a plain
//! 401 page, the JSON delete endpoint answers with a status envelope.

use axum::Json;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use super::Session;
use crate::api::dto::StatusEnvelope;
use crate::error::FlaskrError;

/// Message used by both guards.
pub const PLEASE_LOG_IN: &str = "Please log in.";

/// Lets the request through only for a logged-in session; otherwise
/// responds with [`FlaskrError::Unauthorized`] (401 page).
pub async fn require_login(session: Session, request: Request, next: Next) -> Response {
    if !session.logged_in {
        tracing::info!(path = %request.uri().path(), "refused anonymous request");
        return FlaskrError::Unauthorized.into_response();
    }
    next.run(request).await
}

/// Lets the request through only for a logged-in session; otherwise
/// flashes "Please log in." and responds 401 with
/// `{"status": 0, "message": "Please log in."}`.
pub async fn require_login_json(mut session: Session, request: Request, next: Next) -> Response {
    if !session.logged_in {
        tracing::info!(path = %request.uri().path(), "refused anonymous request");
        session.flash(PLEASE_LOG_IN);
        return (
            StatusCode::UNAUTHORIZED,
            session,
            Json(StatusEnvelope::failure(PLEASE_LOG_IN)),
        )
            .into_response();
    }
    next.run(request).await
}
