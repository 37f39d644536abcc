//! Server configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the server can start with zero
//! configuration for local development.

use std::net::SocketAddr;
use std::path::PathBuf;

use ecoleta_shared::constants::DEFAULT_HTTP_PORT;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address for the HTTP (axum) API server.
    /// Env: `HTTP_ADDR`
    /// Default: `0.0.0.0:3333`
    pub http_addr: SocketAddr,

    /// Public base URL of this API, used to build item image URLs.
    /// Env: `ENDPOINT_NAME`
    /// Default: `http://localhost:3333`
    pub endpoint_name: String,

    /// SQLite database file.
    /// Env: `DATABASE_PATH`
    /// Default: `None`, meaning the platform data directory.
    pub database_path: Option<PathBuf>,

    /// Directory served under `/uploads`.
    /// Env: `UPLOADS_PATH`
    /// Default: `./uploads`
    pub uploads_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: ([0, 0, 0, 0], DEFAULT_HTTP_PORT).into(),
            endpoint_name: format!("http://localhost:{DEFAULT_HTTP_PORT}"),
            database_path: None,
            uploads_path: PathBuf::from("./uploads"),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = var("HTTP_ADDR") {
            if let Ok(parsed) = addr.parse::<SocketAddr>() {
                config.http_addr = parsed;
            } else {
                tracing::warn!(
                    value = %addr,
                    "Invalid HTTP_ADDR, using default"
                );
            }
        }

        if let Some(endpoint) = var("ENDPOINT_NAME") {
            match normalize_endpoint(&endpoint) {
                Some(endpoint) => config.endpoint_name = endpoint,
                None => {
                    tracing::warn!(
                        value = %endpoint,
                        "Invalid ENDPOINT_NAME, using default"
                    );
                }
            }
        }

        if let Some(path) = var("DATABASE_PATH") {
            if !path.is_empty() {
                config.database_path = Some(PathBuf::from(path));
            }
        }

        if let Some(path) = var("UPLOADS_PATH") {
            config.uploads_path = PathBuf::from(path);
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter,
        // so we do not store it here.

        config
    }
}

/// Trim whitespace and trailing slashes; reject anything that is not an
/// absolute http(s) URL.
fn normalize_endpoint(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let rest = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))?;

    if rest.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}
