//! Data models for inbound webhooks and the commands derived from them.

/// Plaid webhook notification and dispatch request model
pub mod webhook;
