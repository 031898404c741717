//! Homework bot worker - Status poller binary
//!
//! This binary runs the poller as a standalone service.
//! For library usage, see the worker crate's lib.rs.

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    hwbot_shared::init_env();

    // Held until exit so buffered log lines reach the file
    let _guard = hwbot_shared::init_tracing("worker")?;

    info!("Starting homework status worker");

    let config = worker::Config::from_env().context("Failed to load configuration")?;
    info!("Configuration loaded");

    let shutdown = CancellationToken::new();
    let token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received Ctrl-C, shutting down");
                token.cancel();
            }
            Err(e) => warn!("Failed to listen for Ctrl-C: {}", e),
        }
    });

    worker::run_worker(config, Some(shutdown)).await?;

    info!("Worker stopped");
    Ok(())
}
