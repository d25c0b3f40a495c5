//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (path params, body)
//! 2. Hands off to the dispatcher service
//! 3. Returns HTTP response (status code, headers)

/// Service health endpoint
pub mod health;
/// Plaid webhook receiver
pub mod webhooks;
