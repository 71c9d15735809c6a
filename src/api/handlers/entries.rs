//! Entry handlers: list, add, delete, search.

use axum::Json;
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};

use super::page_context;
use crate::api::dto::{NewEntryForm, SearchParams, StatusEnvelope};
use crate::app_state::AppState;
use crate::domain::EntryId;
use crate::error::FlaskrError;
use crate::session::Session;
use crate::session::guard::PLEASE_LOG_IN;
use crate::views;

/// Message returned by a successful delete.
pub const POST_DELETED: &str = "Post Deleted";
/// Message returned when the delete path does not name an entry id.
pub const NOT_FOUND: &str = "Not Found";

/// `GET /` — Every entry, newest first.
///
/// # Errors
///
/// Returns [`FlaskrError::Storage`] if the store cannot be read.
pub async fn index(
    State(state): State<AppState>,
    mut session: Session,
) -> Result<impl IntoResponse, FlaskrError> {
    let entries = state.blog.list().await?;
    let ctx = page_context(&mut session);
    Ok((session, Html(views::index_page(&ctx, &entries))))
}

/// `POST /add` — Post a new entry, then redirect home.
///
/// Mounted behind [`crate::session::require_login`].
///
/// # Errors
///
/// Returns [`FlaskrError::BadRequest`] for an undecodable form,
/// [`FlaskrError::Unauthorized`] for an anonymous session and
/// [`FlaskrError::Storage`] if the insert fails.
pub async fn add_entry(
    State(state): State<AppState>,
    mut session: Session,
    form: Result<Form<NewEntryForm>, FormRejection>,
) -> Result<impl IntoResponse, FlaskrError> {
    let Form(form) = form?;
    state
        .blog
        .add_entry(&mut session, &form.title, &form.text)
        .await?;
    Ok((session, Redirect::to("/")))
}

/// `GET /delete/{id}` — Delete an entry and report the outcome as JSON.
///
/// Mounted behind [`crate::session::require_login_json`]. Store failures
/// are reported as `{"status": 0, "message": <error>}` with status 200;
/// an id that is not an integer answers 404.
#[utoipa::path(
    get,
    path = "/delete/{id}",
    tag = "Entries",
    summary = "Delete an entry",
    description = "Deletes the entry with the given id. Deleting an id that does not exist still reports success.",
    params(
        ("id" = i64, Path, description = "Entry id"),
    ),
    responses(
        (status = 200, description = "Outcome envelope; status 1 on success, 0 on store failure", body = StatusEnvelope),
        (status = 401, description = "Not logged in", body = StatusEnvelope),
        (status = 404, description = "Id is not an integer", body = StatusEnvelope),
    )
)]
pub async fn delete_entry(
    State(state): State<AppState>,
    mut session: Session,
    Path(raw_id): Path<String>,
) -> Response {
    let Ok(id) = raw_id.parse::<i64>() else {
        tracing::debug!(raw_id, "delete with non-integer id");
        return (
            StatusCode::NOT_FOUND,
            session,
            Json(StatusEnvelope::failure(NOT_FOUND)),
        )
            .into_response();
    };
    match state.blog.delete_entry(&mut session, EntryId::new(id)).await {
        Ok(_) => (session, Json(StatusEnvelope::success(POST_DELETED))).into_response(),
        Err(FlaskrError::Unauthorized) => (
            StatusCode::UNAUTHORIZED,
            session,
            Json(StatusEnvelope::failure(PLEASE_LOG_IN)),
        )
            .into_response(),
        Err(err) => {
            tracing::warn!(%id, error = %err, "delete failed");
            (session, Json(StatusEnvelope::failure(err.to_string()))).into_response()
        }
    }
}

/// `GET /search?query=<q>` — Entries containing `q`, or all entries.
///
/// # Errors
///
/// Returns [`FlaskrError::Storage`] if the store cannot be read.
pub async fn search(
    State(state): State<AppState>,
    mut session: Session,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, FlaskrError> {
    let query = params.query.as_deref();
    let entries = state.blog.search(query).await?;
    let ctx = page_context(&mut session);
    Ok((session, Html(views::search_page(&ctx, &entries, query))))
}
