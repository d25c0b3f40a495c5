//! Plaid Webhook Service
//!
//! Receives transaction webhooks from Plaid and forwards each one, as a single
//! gRPC call, to the internal finances service.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Backend**: `plaidfinances.PlaidFinancesService` over tonic, TLS + bearer token
//! - **Format**: JSON requests, empty JSON-typed responses
//!
//! # Routes
//!
//! - `POST /plaidwebhook/{user_id}` - webhook receiver
//! - `GET /health` - liveness

pub mod app_state;
pub mod backend;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

/// Build the HTTP router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/plaidwebhook/{user_id}",
            post(handlers::webhooks::receive_webhook),
        )
        // Add distributed tracing middleware for observability
        .layer(TraceLayer::new_for_http())
        // Share the backend client with all handlers via State extraction
        .with_state(state)
}
