//! Configuration for polling.

use crate::history::DEFAULT_WINDOW_SIZE;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Polling schedule and request settings shared by every target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Seconds between probes of the same target
    pub interval_seconds: u64,
    /// Timeout for each probe request
    pub timeout_seconds: u64,
    /// Latency samples kept per target
    pub window_size: usize,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3,
            timeout_seconds: 5,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

impl PollConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// True when a probe may still be in flight as the next tick fires.
    pub fn allows_overlap(&self) -> bool {
        self.timeout_seconds > self.interval_seconds
    }
}
