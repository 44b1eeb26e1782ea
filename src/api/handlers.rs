//! HTTP API handlers.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::metrics;
use crate::reporter::StatusReporter;

/// Application state shared with handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Report builder.
    pub reporter: Arc<StatusReporter>,
}

impl AppState {
    /// Create new app state.
    pub fn new(reporter: StatusReporter) -> Self {
        Self {
            reporter: Arc::new(reporter),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(StatusReporter::default())
    }
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: String,
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Status handler - server identity and known auth endpoints.
pub async fn status(State(state): State<AppState>) -> impl IntoResponse {
    metrics::inc_status_requests("status");
    Json(state.reporter.status())
}

/// Auth capability handler - the three auth subsystems and their availability.
pub async fn auth_capabilities(State(state): State<AppState>) -> impl IntoResponse {
    metrics::inc_status_requests("auth");
    Json(state.reporter.auth_capabilities())
}
