//! uniplan-ui - Ranked Choice List module
//!
//! Serves the catalog search and choice-list HTTP surface for the
//! admission counseling app: students search programs, hydrate detail from
//! the object store, and keep a ranked shortlist persisted per user.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::signal;
use tracing::info;
use uniplan_common::config::{Overrides, ResolvedConfig};
use uniplan_ui::{build_router, AppState};

/// Command-line arguments for uniplan-ui
#[derive(Parser, Debug)]
#[command(name = "uniplan-ui")]
#[command(about = "Ranked choice list module for uniplan")]
#[command(version)]
struct Args {
    /// Path to bootstrap TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Path to SQLite database file
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// URL of the program catalog snapshot
    #[arg(long)]
    catalog_url: Option<String>,

    /// Base URL of the object store for detail/round payloads
    #[arg(long)]
    asset_base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Priority: CLI > UNIPLAN_* env > TOML file > built-in defaults
    let config = ResolvedConfig::resolve(
        Overrides {
            database_path: args.database,
            port: args.port,
            catalog_url: args.catalog_url,
            asset_base_url: args.asset_base_url,
        },
        args.config.as_deref(),
    )?;

    // Initialize tracing subscriber; RUST_LOG wins over the config level
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting uniplan Ranked Choice List (uniplan-ui) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!("Database path: {}", config.database_path.display());
    info!("Catalog URL: {}", config.catalog_url);

    let pool = uniplan_common::db::init_database(&config.database_path)
        .await
        .context("Failed to initialize database")?;

    let state = AppState::new(pool, &config.catalog_url, &config.asset_base_url)
        .context("Failed to create application state")?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", config.port))
        .await
        .context("Failed to bind to address")?;
    info!("uniplan-ui listening on http://127.0.0.1:{}", config.port);
    info!("Health check: http://127.0.0.1:{}/health", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
