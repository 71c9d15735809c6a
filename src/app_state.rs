//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use axum::extract::FromRef;

use crate::config::AuthConfig;
use crate::persistence::EntryStore;
use crate::service::{BlogService, Credentials};
use crate::session::SessionSigner;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Blog service for all business logic.
    pub blog: Arc<BlogService>,
    /// Signs and verifies session cookies.
    pub signer: SessionSigner,
}

impl AppState {
    /// Wires a store and the auth settings into handler state.
    #[must_use]
    pub fn new(store: EntryStore, auth: &AuthConfig) -> Self {
        Self {
            blog: Arc::new(BlogService::new(store, Credentials::from(auth))),
            signer: SessionSigner::new(&auth.secret_key),
        }
    }
}

impl FromRef<AppState> for SessionSigner {
    fn from_ref(state: &AppState) -> Self {
        state.signer.clone()
    }
}
