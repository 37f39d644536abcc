//! # ecoleta-server
//!
//! REST backend for the Ecoleta recycling-point registry.
//!
//! This binary provides:
//! - **Item catalog** (`GET /items`) with image URLs resolved against the
//!   configured public endpoint
//! - **Collection point registration** (`POST /points`) and lookup
//!   (`GET /points`, `GET /points/:id`)
//! - **Static uploads** served under `/uploads`

mod api;
mod config;
mod error;

use tracing::info;
use tracing_subscriber::EnvFilter;

use ecoleta_shared::constants::APP_NAME;
use ecoleta_store::Database;

use crate::api::AppState;
use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Initialize tracing (respects RUST_LOG env var)
    // -----------------------------------------------------------------------
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,ecoleta_server=debug")),
        )
        .init();

    info!("Starting {} server v{}", APP_NAME, env!("CARGO_PKG_VERSION"));

    // -----------------------------------------------------------------------
    // 2. Load configuration
    // -----------------------------------------------------------------------
    let config = ServerConfig::from_env();
    info!(?config, "Loaded configuration");

    // -----------------------------------------------------------------------
    // 3. Open the store and the uploads directory
    // -----------------------------------------------------------------------
    let db = match config.database_path {
        Some(ref path) => Database::open_at(path)?,
        None => Database::new()?,
    };

    tokio::fs::create_dir_all(&config.uploads_path).await?;
    info!(path = %config.uploads_path.display(), "Serving uploads");

    let http_addr = config.http_addr;
    let app_state = AppState::new(db, config);

    // -----------------------------------------------------------------------
    // 4. Run the HTTP API server (blocks until shutdown)
    // -----------------------------------------------------------------------
    tokio::select! {
        result = api::serve(app_state, http_addr) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "HTTP server failed");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
