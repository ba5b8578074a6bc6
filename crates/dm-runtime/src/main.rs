//! # Data Manager
//!
//! Serves the typed asset store over HTTP.

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use dm_runtime::{build_gateway, load_config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Load configuration
    let config = load_config();
    info!(
        backend = %config.storage.backend,
        data_dir = %config.storage.data_dir.display(),
        "Configuration loaded"
    );

    let gateway = build_gateway(config)?;

    gateway
        .run(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal"),
        Err(e) => warn!(error = %e, "Failed to listen for Ctrl+C; shutting down"),
    }
}
