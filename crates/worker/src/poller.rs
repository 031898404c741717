//! Poll loop
//!
//! Fetches statuses, reports changes and turns every cycle failure into a
//! failure notice for the operator.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use hwbot_core::{ErrorMemo, ResponseError, failure_message, has_changed, parse_status, validate_response};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::Config;
use crate::client::{FetchError, StatusSource};
use crate::notifier::{NotifyError, Notifier};

/// Everything that can go wrong inside one poll cycle
#[derive(Error, Debug)]
pub enum CycleError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Response(#[from] ResponseError),

    #[error(transparent)]
    Notify(#[from] NotifyError),
}

impl CycleError {
    /// Whether the loop should sleep and poll again rather than stop
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Fetch(_) | Self::Response(_) | Self::Notify(_) => true,
        }
    }
}

/// What a successful cycle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The API reported no homeworks since the cursor
    NoHomeworks,
    /// The latest status was already announced
    Unchanged,
    /// A status message was sent
    Notified,
}

/// Mutable state owned by the loop
#[derive(Debug, Clone)]
pub struct PollState {
    /// Lower bound for the next poll's `from_date`
    pub cursor: i64,
    /// Last status message delivered to the chat
    pub last_notified: String,
    pub error_memo: ErrorMemo,
}

/// Poll loop context
pub struct Poller {
    source: Arc<dyn StatusSource>,
    notifier: Arc<dyn Notifier>,
    poll_interval: Duration,
    max_repeated_errors: u32,
    state: PollState,
}

impl Poller {
    /// Create a poller whose cursor starts `lookback_secs` before now
    pub fn new(source: Arc<dyn StatusSource>, notifier: Arc<dyn Notifier>, config: &Config) -> Self {
        let cursor = Utc::now().timestamp().saturating_sub(config.lookback_secs);

        Self {
            source,
            notifier,
            poll_interval: Duration::from_secs(config.poll_interval_secs),
            max_repeated_errors: config.max_repeated_errors,
            state: PollState {
                cursor,
                last_notified: String::new(),
                error_memo: ErrorMemo::new(),
            },
        }
    }

    pub const fn state(&self) -> &PollState {
        &self.state
    }

    /// Run one fetch, validate, parse and notify pass
    pub async fn run_cycle(&mut self) -> Result<CycleOutcome, CycleError> {
        let body = self.source.fetch(self.state.cursor).await?;
        let response = validate_response(&body)?;

        let Some(record) = response.latest() else {
            info!("No homework status changes since {}", self.state.cursor);
            return Ok(CycleOutcome::NoHomeworks);
        };

        let message = parse_status(record)?;

        let outcome = if has_changed(&message, &self.state.last_notified) {
            self.notifier.notify(&message).await?;
            info!("Sent status update: {}", message);
            self.state.last_notified = message;
            CycleOutcome::Notified
        } else {
            info!("Homework status unchanged");
            CycleOutcome::Unchanged
        };

        let next_cursor = response
            .current_date
            .unwrap_or_else(|| Utc::now().timestamp());
        debug!("Advancing cursor {} -> {}", self.state.cursor, next_cursor);
        self.state.cursor = next_cursor;

        Ok(outcome)
    }

    /// Run one cycle and handle its failure, if any
    ///
    /// Only an unrecoverable error is returned; everything else is reported
    /// to the chat and swallowed.
    pub async fn tick(&mut self) -> Result<(), CycleError> {
        match self.run_cycle().await {
            Ok(outcome) => {
                debug!("Poll cycle finished: {:?}", outcome);
                self.state.error_memo.reset();
            }
            Err(e) if e.is_recoverable() => self.report_failure(&e).await,
            Err(e) => return Err(e),
        }

        Ok(())
    }

    async fn report_failure(&mut self, err: &CycleError) {
        let message = failure_message(err);
        error!("{}", message);

        if !self
            .state
            .error_memo
            .should_notify(&message, self.max_repeated_errors)
        {
            warn!(
                "Suppressing failure notice, same error {} times in a row",
                self.state.error_memo.repeats()
            );
            return;
        }

        if let Err(e) = self.notifier.notify(&message).await {
            error!("Failed to deliver failure notice: {}", e);
        }
    }

    /// Poll until cancelled, sleeping the configured interval between cycles
    pub async fn run(mut self, shutdown: Option<CancellationToken>) -> Result<(), CycleError> {
        loop {
            // Check for shutdown signal
            if let Some(ref token) = shutdown
                && token.is_cancelled()
            {
                info!("Worker received shutdown signal");
                break;
            }

            self.tick().await?;

            match shutdown {
                Some(ref token) => {
                    tokio::select! {
                        () = tokio::time::sleep(self.poll_interval) => {}
                        () = token.cancelled() => {
                            info!("Worker received shutdown signal");
                            break;
                        }
                    }
                }
                None => tokio::time::sleep(self.poll_interval).await,
            }
        }

        Ok(())
    }
}
