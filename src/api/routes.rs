//! HTTP API route definitions.

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{auth_capabilities, health, status, AppState};

/// Create the API router with the status routes mounted under `/api/{status_root}`.
pub fn create_router(state: AppState, status_root: &str) -> Router {
    let root = format!("/api/{}", status_root.trim_matches('/'));

    Router::new()
        // Health endpoint
        .route("/health", get(health))
        // Status endpoints
        .route(&root, get(status))
        .route(&format!("{root}/auth"), get(auth_capabilities))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
