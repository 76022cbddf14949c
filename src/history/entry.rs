//! Per-target history state.

use super::average::up_average;
use super::window::LatencyWindow;
use crate::probe::StatusRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Latest probe result plus the rolling latency window for one target.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Most recent probe result (pending placeholder until the first probe)
    pub latest: StatusRecord,
    /// Rolling latency samples
    pub window: LatencyWindow,
    /// When the latest result was applied
    pub last_checked: Option<DateTime<Utc>>,
}

impl HistoryEntry {
    pub fn new(url: &str, capacity: usize) -> Self {
        Self {
            latest: StatusRecord::pending(url),
            window: LatencyWindow::new(capacity),
            last_checked: None,
        }
    }

    /// Replace the latest record and push its latency into the window.
    ///
    /// Returns true when the healthy flag flipped. The first result only
    /// counts as a change when it is healthy, since the placeholder is down.
    pub fn apply(&mut self, record: StatusRecord) -> bool {
        let changed = self.latest.healthy != record.healthy;
        self.window.push(record.response_millis);
        self.latest = record;
        self.last_checked = Some(Utc::now());
        changed
    }

    /// Detached copy for readers.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            latest: self.latest.clone(),
            window: self.window.to_vec(),
            last_checked: self.last_checked,
        }
    }
}

/// Point-in-time copy of a [`HistoryEntry`], safe to hold without the lock.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub latest: StatusRecord,
    /// Samples from oldest to newest
    pub window: Vec<u64>,
    pub last_checked: Option<DateTime<Utc>>,
}

impl Snapshot {
    /// Mean latency over the healthy samples in the window.
    pub fn up_average(&self) -> f64 {
        up_average(&self.window)
    }
}
