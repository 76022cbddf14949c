//! Configuration module for httpoll
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`HTTPOLL_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use httpoll::config::HttpollConfig;
//!
//! let config = HttpollConfig::default();
//! assert_eq!(config.poll.interval_seconds, 3);
//!
//! let toml = r#"
//! targets = ["https://example.com"]
//! [poll]
//! window_size = 20
//! "#;
//! let config: HttpollConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.poll.window_size, 20);
//! assert_eq!(config.targets.len(), 1);
//! ```

pub mod dashboard;
pub mod error;
pub mod logging;

pub use dashboard::DashboardConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};

// Re-export PollConfig from poller module
pub use crate::poller::PollConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for httpoll.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HttpollConfig {
    /// URLs to poll
    pub targets: Vec<String>,
    /// Polling schedule and request settings
    pub poll: PollConfig,
    /// Live dashboard settings
    pub dashboard: DashboardConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl HttpollConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports HTTPOLL_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(interval) = std::env::var("HTTPOLL_INTERVAL") {
            if let Ok(v) = interval.parse() {
                self.poll.interval_seconds = v;
            }
        }
        if let Ok(timeout) = std::env::var("HTTPOLL_TIMEOUT") {
            if let Ok(v) = timeout.parse() {
                self.poll.timeout_seconds = v;
            }
        }
        if let Ok(window) = std::env::var("HTTPOLL_WINDOW") {
            if let Ok(v) = window.parse() {
                self.poll.window_size = v;
            }
        }

        if let Ok(level) = std::env::var("HTTPOLL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("HTTPOLL_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration
    ///
    /// A timeout longer than the interval is allowed; probes of the same
    /// target may then overlap.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll.interval_seconds == 0 {
            return Err(validation("poll.interval_seconds", "interval must be non-zero"));
        }
        if self.poll.timeout_seconds == 0 {
            return Err(validation("poll.timeout_seconds", "timeout must be non-zero"));
        }
        if self.poll.window_size == 0 {
            return Err(validation("poll.window_size", "window size must be non-zero"));
        }
        if self.dashboard.refresh_millis == 0 {
            return Err(validation(
                "dashboard.refresh_millis",
                "refresh interval must be non-zero",
            ));
        }

        for (i, target) in self.targets.iter().enumerate() {
            if target.trim().is_empty() {
                return Err(validation(&format!("targets[{}]", i), "URL cannot be empty"));
            }
        }

        Ok(())
    }
}

fn validation(field: &str, message: &str) -> ConfigError {
    ConfigError::Validation {
        field: field.to_string(),
        message: message.to_string(),
    }
}
