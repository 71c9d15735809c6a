//! Login and logout handlers.

use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::response::{Html, IntoResponse, Redirect, Response};

use super::page_context;
use crate::api::dto::LoginForm;
use crate::app_state::AppState;
use crate::error::FlaskrError;
use crate::session::Session;
use crate::views;

/// `GET /login` — Render the login form.
pub async fn login_form(mut session: Session) -> impl IntoResponse {
    let ctx = page_context(&mut session);
    (session, Html(views::login_page(&ctx, None)))
}

/// `POST /login` — Check credentials.
///
/// On success redirects home; on a credential mismatch re-renders the
/// form with the error inline.
///
/// # Errors
///
/// Credential mismatches are rendered, not returned. An undecodable form
/// yields [`FlaskrError::BadRequest`]; any other [`FlaskrError`] is
/// propagated.
pub async fn login(
    State(state): State<AppState>,
    mut session: Session,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Response, FlaskrError> {
    let Form(form) = form?;
    match state.blog.login(&mut session, &form.username, &form.password) {
        Ok(()) => Ok((session, Redirect::to("/")).into_response()),
        Err(err) if err.is_login_failure() => {
            let message = err.to_string();
            let ctx = page_context(&mut session);
            Ok((session, Html(views::login_page(&ctx, Some(&message)))).into_response())
        }
        Err(err) => Err(err),
    }
}

/// `GET /logout` — Clear the logged-in flag and redirect home.
pub async fn logout(State(state): State<AppState>, mut session: Session) -> impl IntoResponse {
    state.blog.logout(&mut session);
    (session, Redirect::to("/"))
}
