//! Probe outcome record.

use serde::{Deserialize, Serialize};

/// Outcome of a single probe against one target.
///
/// `response_millis` is only non-zero for healthy probes; `0` means the target
/// was down or has not been measured yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    /// Target URL, also the history store key
    pub url: String,
    /// Remote status line (`200 OK`) or local error description
    pub status_text: String,
    /// True only for a local success with a remote status below 300
    pub healthy: bool,
    /// Request duration in milliseconds when healthy, otherwise 0
    pub response_millis: u64,
}

impl StatusRecord {
    /// Placeholder record held by the store before the first probe completes.
    pub fn pending(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Record for a healthy response.
    pub fn up(url: impl Into<String>, status_text: impl Into<String>, response_millis: u64) -> Self {
        Self {
            url: url.into(),
            status_text: status_text.into(),
            healthy: true,
            response_millis,
        }
    }

    /// Record for a failed probe. Timing is always discarded.
    pub fn down(url: impl Into<String>, status_text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status_text: status_text.into(),
            healthy: false,
            response_millis: 0,
        }
    }
}
