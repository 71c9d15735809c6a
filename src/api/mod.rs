//! HTTP layer: route handlers, DTOs, guards, and router composition.

pub mod docs;
pub mod dto;
pub mod handlers;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};

use crate::app_state::AppState;
use crate::session::{require_login, require_login_json};

/// Path the OpenAPI document is served at.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Builds the complete router with every endpoint and its login guard.
///
/// `/add` aborts anonymous requests with a 401 page; `/delete/{id}`
/// answers them with a 401 JSON envelope.
pub fn build_router(state: AppState) -> Router {
    let add = Router::new()
        .route("/add", post(handlers::entries::add_entry))
        .route_layer(from_fn_with_state(state.clone(), require_login));

    let delete = Router::new()
        .route("/delete/{id}", get(handlers::entries::delete_entry))
        .route_layer(from_fn_with_state(state.clone(), require_login_json));

    let router = Router::new()
        .merge(handlers::routes())
        .merge(add)
        .merge(delete)
        .merge(handlers::system::routes())
        .with_state(state);

    with_api_docs(router)
}

#[cfg(feature = "swagger-ui")]
fn with_api_docs(router: Router) -> Router {
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    router.merge(SwaggerUi::new("/swagger-ui").url(OPENAPI_PATH, docs::ApiDoc::openapi()))
}

#[cfg(not(feature = "swagger-ui"))]
fn with_api_docs(router: Router) -> Router {
    use utoipa::OpenApi;

    router.route(OPENAPI_PATH, get(|| async { axum::Json(docs::ApiDoc::openapi()) }))
}
