//! Plaid Webhook Service - Main Application Entry Point
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Configure the (lazily connected) finances backend channel
//! 3. Build HTTP router with routes and middleware
//! 4. Start server on configured port, stop on Ctrl+C / SIGTERM

use std::sync::Arc;

use plaid_webhook_service::{
    app_state::AppState, backend::grpc::GrpcFinanceBackend, config::Config, create_router,
};
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(environment = %config.server_env, "Configuration loaded");

    // The channel is shared by every request and never reconnected by handlers
    let backend = GrpcFinanceBackend::connect_lazy(&config)?;

    let app = create_router(AppState::new(Arc::new(backend), config.server_env.clone()));

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Starting Webhook Server on {} ({})", addr, config.server_env);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down.");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, shutting down.");
        },
    }
}
