//! Health check endpoint for service monitoring.

use crate::app_state::AppState;
use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service status
    pub status: String,

    /// Environment the service runs in (`SERVER_ENV`)
    pub environment: String,

    /// Current server timestamp
    pub timestamp: DateTime<Utc>,
}

/// Health check handler.
///
/// The finances backend is not checked: its channel connects lazily and a
/// failing backend already shows up as 500s on the webhook route.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "status": "healthy",
///   "environment": "local",
///   "timestamp": "2025-12-21T19:00:00Z"
/// }
/// ```
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        environment: state.environment.clone(),
        timestamp: Utc::now(),
    })
}
