//! # Sweetify API server
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Sweetify API Server                             │
//! │                                                                         │
//! │  Browser ───► HTTP (5000) ───► axum Router ───► Handlers ───► SQLite    │
//! │                                    │                                    │
//! │                                    ▼                                    │
//! │                          TraceLayer + CORS                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use sweetify_api::{AppState, ApiConfig};
use sweetify_db::{Database, DbConfig};

const DEFAULT_LOG_FILTER: &str = "sweetify_api=info,sweetify_db=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_target(true)
        .init();

    info!("Starting Sweetify API server...");

    let config = ApiConfig::load().context("invalid configuration")?;
    info!(
        addr = %config.socket_addr(),
        db_path = %config.database_path,
        cors = config.cors_allow_origin.as_deref().unwrap_or("*"),
        "Configuration loaded"
    );
    if config.uses_dev_secret() {
        warn!("JWT_SECRET is not set; using the development secret");
    }

    let db = Database::new(
        DbConfig::new(&config.database_path).max_connections(config.database_max_connections),
    )
    .await
    .context("failed to open database")?;
    info!("Database ready");

    let addr = config.socket_addr();
    let state = AppState::new(db.clone(), config);
    let app = sweetify_api::app(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
