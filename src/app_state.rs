use std::sync::Arc;

use crate::backend::FinanceBackend;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Finances backend, created once at startup and never reconnected by handlers
    pub backend: Arc<dyn FinanceBackend>,

    /// Environment label reported by the health check
    pub environment: String,
}

impl AppState {
    pub fn new(backend: Arc<dyn FinanceBackend>, environment: impl Into<String>) -> Self {
        Self {
            backend,
            environment: environment.into(),
        }
    }
}
