//! OpenAPI document for the JSON endpoints.

use utoipa::OpenApi;

use super::handlers;

/// OpenAPI description of `/delete/{id}` and `/health`.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "flaskr", description = "JSON endpoints of the Flaskr blog"),
    paths(handlers::entries::delete_entry, handlers::system::health_handler),
    tags(
        (name = "Entries", description = "Entry deletion"),
        (name = "System", description = "Service health"),
    )
)]
pub struct ApiDoc;
