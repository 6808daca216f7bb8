//! API Routes
//!
//! Configures the Axum router with the relay endpoints and the static
//! frontend fallback.

use std::path::Path;

use axum::{routing::get, Router};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};

use super::handlers::{
    health_handler, preflight_handler, proxy_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /proxy?url=...` - Fetch an allowlisted upstream resource
/// - `OPTIONS /proxy` - CORS preflight acknowledgment
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// CORS headers on `/proxy` are set by the handlers themselves so that the
/// preflight answer is exactly the static 204.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/proxy", get(proxy_handler).options(preflight_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Creates the router and mounts `static_dir` as the fallback for every
/// path no API route matches.
///
/// A missing directory leaves the API router unchanged.
pub fn create_app(state: AppState, static_dir: &Path) -> Router {
    let api = create_router(state);

    if static_dir.is_dir() {
        info!("Serving static files from {}", static_dir.display());
        api.fallback_service(ServeDir::new(static_dir).append_index_html_on_directories(true))
    } else {
        warn!(
            "Static directory {} not found, serving API routes only",
            static_dir.display()
        );
        api
    }
}
