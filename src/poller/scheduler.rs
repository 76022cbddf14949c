//! Per-target periodic probing.

use crate::probe::{Prober, StatusRecord};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Start probing `url` every `interval` until `cancel_token` fires.
///
/// The first probe runs immediately. Each tick spawns its probe as a separate
/// task, so a slow probe does not delay the next one and several probes for
/// the same target may be in flight at once. Results go to `sink`; the
/// scheduler never touches the history store. Cancelling aborts in-flight
/// probes. The task also ends once the receiving side of `sink` is gone.
pub fn spawn_periodic(
    url: String,
    prober: Prober,
    interval: Duration,
    sink: UnboundedSender<StatusRecord>,
    cancel_token: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut in_flight = JoinSet::new();

        tracing::debug!(url = %url, interval_ms = interval.as_millis() as u64, "Scheduler started");

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => break,
                _ = ticker.tick() => {
                    if sink.is_closed() {
                        break;
                    }
                    let prober = prober.clone();
                    let url = url.clone();
                    let sink = sink.clone();
                    in_flight.spawn(async move {
                        let record = prober.probe(&url).await;
                        // Receiver gone means the poller is shutting down
                        let _ = sink.send(record);
                    });
                }
                Some(_) = in_flight.join_next(), if !in_flight.is_empty() => {}
            }
        }

        in_flight.abort_all();
        tracing::debug!(url = %url, "Scheduler stopped");
    })
}
