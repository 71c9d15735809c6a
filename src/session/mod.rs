//! Session gate: per-client state carried in a signed cookie.
//!
//! [`Session`] is an axum extractor. It reads the `flaskr_session` cookie,
//! verifies it with the [`SessionSigner`] held in application state, and
//! falls back to an anonymous session when the cookie is missing or
//! invalid. Returning the `Session` as part of a response writes the
//! cookie back if the state changed during the request.
//!
//! The session is threaded explicitly through each handler, so concurrent
//! clients never share mutable state.

pub mod guard;
pub mod signer;

use std::convert::Infallible;
use std::ops::{Deref, DerefMut};

use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponseParts, ResponseParts};

pub use guard::{require_login, require_login_json};
pub use signer::{SessionCookieError, SessionSigner};

use crate::domain::SessionState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "flaskr_session";

/// Session state for the current request.
///
/// Dereferences to [`SessionState`].
#[derive(Debug)]
pub struct Session {
    state: SessionState,
    loaded: SessionState,
    signer: SessionSigner,
}

impl Session {
    /// Builds a session from request headers, verifying the cookie.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap, signer: SessionSigner) -> Self {
        let state = cookie_value(headers, SESSION_COOKIE)
            .and_then(|value| match signer.decode(value) {
                Ok(state) => Some(state),
                Err(err) => {
                    tracing::debug!(error = %err, "discarding session cookie");
                    None
                }
            })
            .unwrap_or_default();
        Self {
            loaded: state.clone(),
            state,
            signer,
        }
    }

    /// Returns `true` if the state was modified since it was loaded.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.state != self.loaded
    }

    /// Full `Set-Cookie` header value for the current state.
    fn set_cookie_value(&self) -> Option<HeaderValue> {
        let value = match self.signer.encode(&self.state) {
            Ok(value) => value,
            Err(err) => {
                tracing::error!(error = %err, "failed to encode session cookie");
                return None;
            }
        };
        HeaderValue::from_str(&format!(
            "{SESSION_COOKIE}={value}; HttpOnly; SameSite=Lax; Path=/"
        ))
        .ok()
    }
}

impl Deref for Session {
    type Target = SessionState;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl DerefMut for Session {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.state
    }
}

impl<S> FromRequestParts<S> for Session
where
    SessionSigner: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers, SessionSigner::from_ref(state)))
    }
}

impl IntoResponseParts for Session {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if self.is_modified()
            && let Some(value) = self.set_cookie_value()
        {
            res.headers_mut().append(SET_COOKIE, value);
        }
        Ok(res)
    }
}

/// Finds a cookie by name across all `Cookie` headers.
fn cookie_value<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}
