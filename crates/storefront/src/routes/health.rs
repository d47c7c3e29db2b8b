//! Health checks.

use axum::{extract::State, http::StatusCode};

use crate::state::{AppState, LoadState};

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the catalog.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable until the catalog has loaded, and for
/// good if the load failed.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.status().await.state {
        LoadState::Ready => StatusCode::OK,
        LoadState::Loading | LoadState::Failed => StatusCode::SERVICE_UNAVAILABLE,
    }
}
