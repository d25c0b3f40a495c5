//! Error types and HTTP error response handling.
//!
//! This module defines the errors that end a webhook request early and how
//! they are converted into HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::backend::{BackendError, BackendMethod};

/// Application-wide error type.
///
/// Every variant is terminal for the current request. Plaid only learns that
/// processing failed and retries on its own schedule.
///
/// # Error Categories
///
/// - **Path Errors**: `user_id` segment is not a 64-bit integer
/// - **Payload Errors**: Body is not a valid webhook notification
/// - **Backend Errors**: The finances service call failed
/// - **Task Errors**: The detached dispatch task panicked
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The `{user_id}` path segment did not parse as an `i64`.
    #[error("Unable to retrieve user id")]
    MalformedUserId(#[source] std::num::ParseIntError),

    /// The request body is not JSON matching the notification shape.
    #[error("Unable to decode webhook")]
    MalformedPayload(#[source] serde_json::Error),

    /// The backend call returned an error status or failed in transport.
    #[error("Service call to {method} failed")]
    BackendCallFailed {
        method: BackendMethod,
        #[source]
        source: BackendError,
    },

    /// The task running the dispatch panicked or was aborted.
    #[error("Webhook dispatch did not complete")]
    DispatchTaskFailed(#[source] tokio::task::JoinError),
}

impl AppError {
    /// Record the error, with its cause, in the current span.
    pub fn log(&self) {
        match self {
            AppError::MalformedUserId(err) => {
                tracing::error!(error = %err, "{}", self);
            }
            AppError::MalformedPayload(err) => {
                tracing::error!(error = %err, "{}", self);
            }
            AppError::BackendCallFailed { method, source } => {
                tracing::error!(method = %method, error = %source, "{}", self);
            }
            AppError::DispatchTaskFailed(err) => {
                tracing::error!(error = %err, "{}", self);
            }
        }
    }
}

/// Convert AppError into an HTTP response.
///
/// All variants map to 500 Internal Server Error with the plain-text status
/// reason as body. Details stay in the logs.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let reason = status.canonical_reason().unwrap_or("Internal Server Error");

        (status, reason).into_response()
    }
}
