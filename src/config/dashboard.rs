//! Dashboard configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Live dashboard settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Milliseconds between redraws
    pub refresh_millis: u64,
    /// Use colors in the dashboard
    pub color: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_millis: 1000,
            color: true,
        }
    }
}

impl DashboardConfig {
    pub fn refresh(&self) -> Duration {
        Duration::from_millis(self.refresh_millis)
    }
}
