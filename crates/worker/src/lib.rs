//! Homework bot worker - Status poller
//!
//! Polls the homework status API and forwards status changes to Telegram

mod client;
mod config;
mod notifier;
mod poller;

pub use client::{FetchError, PracticumClient, StatusSource};
pub use config::{Config, DEFAULT_ENDPOINT};
pub use notifier::{Notifier, NotifyError, TelegramNotifier};
pub use poller::{CycleError, CycleOutcome, PollState, Poller};

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Build a poller wired to the real status API and Telegram
pub fn build_poller(config: &Config) -> Result<Poller> {
    let client = PracticumClient::new(
        config.endpoint.clone(),
        config.practicum_token.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )
    .context("Failed to create status API client")?;
    let notifier = TelegramNotifier::from_config(config);

    Ok(Poller::new(Arc::new(client), Arc::new(notifier), config))
}

/// Run the status poller
///
/// This function runs the polling loop until cancelled.
///
/// # Arguments
/// * `config` - Worker configuration
/// * `shutdown` - Optional cancellation token for graceful shutdown
pub async fn run_worker(config: Config, shutdown: Option<CancellationToken>) -> Result<()> {
    let poller = build_poller(&config)?;

    info!(
        "Starting worker: endpoint={}, poll_interval={}s, lookback={}s, max_repeated_errors={}",
        config.endpoint,
        config.poll_interval_secs,
        config.lookback_secs,
        config.max_repeated_errors
    );

    poller.run(shutdown).await?;

    Ok(())
}
