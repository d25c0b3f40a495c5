//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `SERVER_ENV` (optional): Environment label (`local`, `prd`), defaults to `local`
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 8081
/// - `API_SERVER_ADDRESS` (optional): Finances backend `host:port`, defaults to `localhost:50051`
/// - `API_SERVER_TLS_CA_PATH` (optional): PEM encoded CA certificate. Enables TLS when set
/// - `API_SERVER_TLS_DOMAIN` (optional): Server name checked against the backend certificate
/// - `API_SERVER_ACCESS_TOKEN` (optional): Bearer token attached to every backend call
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_env")]
    pub server_env: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_api_server_address")]
    pub api_server_address: String,

    pub api_server_tls_ca_path: Option<String>,

    pub api_server_tls_domain: Option<String>,

    pub api_server_access_token: Option<String>,
}

fn default_env() -> String {
    "local".to_string()
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    8081
}

fn default_api_server_address() -> String {
    "localhost:50051".to_string()
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable value cannot be parsed
    /// into its expected type (e.g. a non-numeric `SERVER_PORT`).
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Field names are automatically converted: server_port -> SERVER_PORT
        envy::from_env::<Config>()
    }

    /// Whether backend calls go over TLS.
    pub fn backend_tls_enabled(&self) -> bool {
        self.api_server_tls_ca_path
            .as_deref()
            .is_some_and(|path| !path.is_empty())
    }

    /// Access token to attach to backend calls, if one is configured.
    pub fn backend_access_token(&self) -> Option<&str> {
        self.api_server_access_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }
}
