//! Concurrent polling engine.
//!
//! The [`Poller`] owns the history store and a results channel. One scheduler
//! task per target feeds probe results into the channel, and a single
//! dispatch loop drains it into the store, so the store has exactly one
//! writer no matter how many probes finish at once.

mod config;
mod error;
pub mod scheduler;


pub use config::*;
pub use error::*;
pub use scheduler::spawn_periodic;

use crate::history::{HistoryError, HistoryStore};
use crate::probe::{Prober, StatusRecord};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Background service that probes every target on its own schedule.
pub struct Poller {
    targets: Vec<String>,
    prober: Prober,
    interval: Duration,
    store: Arc<HistoryStore>,
}

impl Poller {
    /// Create a poller from configuration.
    ///
    /// The history store is fully initialized before this returns, so readers
    /// obtained through [`store`](Self::store) always find every target.
    pub fn new(targets: Vec<String>, config: &PollConfig) -> Result<Self, PollError> {
        let prober = Prober::new(config.timeout())?;
        Self::with_prober(targets, prober, config.interval(), config.window_size)
    }

    /// Create a poller with a custom prober and interval (for testing).
    pub fn with_prober(
        targets: Vec<String>,
        prober: Prober,
        interval: Duration,
        window_size: usize,
    ) -> Result<Self, PollError> {
        if targets.is_empty() {
            return Err(PollError::NoTargets);
        }
        if interval.is_zero() {
            return Err(PollError::InvalidSettings(
                "interval must be non-zero".to_string(),
            ));
        }
        if window_size == 0 {
            return Err(PollError::InvalidSettings(
                "window size must be non-zero".to_string(),
            ));
        }

        let store = Arc::new(HistoryStore::new(window_size));
        store.initialize(targets.iter().cloned())?;

        Ok(Self {
            targets,
            prober,
            interval,
            store,
        })
    }

    /// Shared handle to the history store for read-only consumers.
    pub fn store(&self) -> Arc<HistoryStore> {
        Arc::clone(&self.store)
    }

    /// Start the poller as a background task.
    /// Returns a JoinHandle that resolves when the poller stops.
    pub fn start(self, cancel_token: CancellationToken) -> JoinHandle<Result<(), PollError>> {
        tokio::spawn(self.run(cancel_token))
    }

    /// Poll until `cancel_token` fires or the store fails.
    pub async fn run(self, cancel_token: CancellationToken) -> Result<(), PollError> {
        let (tx, rx) = mpsc::unbounded_channel();
        // Schedulers stop with the caller's token or when dispatch fails
        let schedulers_token = cancel_token.child_token();

        tracing::info!(
            targets = self.targets.len(),
            interval_ms = self.interval.as_millis() as u64,
            timeout_ms = self.prober.timeout().as_millis() as u64,
            "Poller started"
        );

        let schedulers: Vec<_> = self
            .targets
            .iter()
            .map(|url| {
                spawn_periodic(
                    url.clone(),
                    self.prober.clone(),
                    self.interval,
                    tx.clone(),
                    schedulers_token.clone(),
                )
            })
            .collect();
        drop(tx);

        let result = dispatch(&self.store, rx, cancel_token).await;

        schedulers_token.cancel();
        for scheduler in schedulers {
            if let Err(e) = scheduler.await {
                tracing::error!(error = %e, "Scheduler task failed");
            }
        }

        match &result {
            Ok(applied) => tracing::info!(applied = *applied, "Poller stopped"),
            Err(e) => tracing::error!(error = %e, "Poller stopped after store failure"),
        }

        result.map(|_| ())
    }
}

/// Drain `results` into `store` until cancelled or every sender is dropped.
///
/// This loop is the store's only writer. Returns how many results were
/// applied. Results for unknown targets are skipped; a poisoned store is
/// fatal.
pub async fn dispatch(
    store: &HistoryStore,
    mut results: UnboundedReceiver<StatusRecord>,
    cancel_token: CancellationToken,
) -> Result<u64, PollError> {
    let mut applied = 0u64;

    loop {
        tokio::select! {
            _ = cancel_token.cancelled() => break,
            received = results.recv() => {
                let Some(record) = received else {
                    break;
                };
                if apply_record(store, record)? {
                    applied += 1;
                }
            }
        }
    }

    Ok(applied)
}

/// Apply one result, returning whether it landed in the store.
fn apply_record(store: &HistoryStore, record: StatusRecord) -> Result<bool, PollError> {
    let url = record.url.clone();
    let healthy = record.healthy;
    let latency_ms = record.response_millis;
    let status = record.status_text.clone();

    match store.apply(record) {
        Ok(changed) => {
            tracing::debug!(url = %url, healthy, latency_ms, status = %status, "Probe result applied");
            if changed {
                tracing::info!(url = %url, healthy, status = %status, "Target status changed");
            }
            Ok(true)
        }
        Err(HistoryError::UnknownTarget(url)) => {
            tracing::warn!(url = %url, "Dropping result for unknown target");
            Ok(false)
        }
        Err(e) => {
            tracing::error!(error = %e, "History store unavailable");
            Err(e.into())
        }
    }
}
