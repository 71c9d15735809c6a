//! HTTP handlers organized by concern.

pub mod auth;
pub mod entries;
pub mod system;

use axum::Router;
use axum::routing::get;

use crate::app_state::AppState;
use crate::session::Session;
use crate::views::PageContext;

/// Unguarded page routes: list, search, login, logout.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(entries::index))
        .route("/search", get(entries::search))
        .route("/search/", get(entries::search))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", get(auth::logout))
}

/// Drains the session's flashes into the context a page renders with.
fn page_context(session: &mut Session) -> PageContext {
    PageContext {
        logged_in: session.logged_in,
        flashes: session.take_flashes(),
    }
}
