//! HTTP API handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::config::DEFAULT_GREETING;

/// Application state shared with handlers. Immutable after startup.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Body of the root route.
    pub greeting: Arc<str>,
}

impl AppState {
    /// Create new app state.
    pub fn new(greeting: impl Into<Arc<str>>) -> Self {
        Self {
            greeting: greeting.into(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_GREETING)
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Root handler - returns the configured greeting as plain text.
pub async fn root(State(state): State<AppState>) -> String {
    state.greeting.to_string()
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Fallback for unregistered paths.
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
