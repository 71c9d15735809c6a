//! flaskr server entry point.
//!
//! Opens the entry store, then serves the blog over HTTP.

use anyhow::Context;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use flaskr::api;
use flaskr::app_state::AppState;
use flaskr::config::FlaskrConfig;
use flaskr::persistence::EntryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = FlaskrConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.json_logs {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
    tracing::info!(addr = %config.listen_addr, "starting flaskr");

    // Open the store and create the table if needed
    let store = EntryStore::connect(&config.store)
        .await
        .with_context(|| format!("opening {}", config.store.database_url))?;
    tracing::info!(schema = %store.schema(), "entry store ready");

    // Build router
    let app = api::build_router(AppState::new(store, &config.auth))
        .layer(TraceLayer::new_for_http());

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
