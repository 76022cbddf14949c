//! Single-shot HTTP probing.
//!
//! A probe times one GET request against a target and classifies the outcome
//! into a [`StatusRecord`]. Probing never fails: transport errors and error
//! statuses are folded into unhealthy records.

mod error;
mod status;

#[cfg(test)]
mod tests;

pub use error::*;
pub use status::*;

use std::time::{Duration, Instant};

/// Issues timed GET requests through a shared, pooled HTTP client.
#[derive(Debug, Clone)]
pub struct Prober {
    client: reqwest::Client,
    timeout: Duration,
}

impl Prober {
    /// Create a prober whose client enforces `timeout` on every request.
    pub fn new(timeout: Duration) -> Result<Self, ProbeError> {
        Ok(Self {
            client: build_client(timeout)?,
            timeout,
        })
    }

    /// Create a prober around an existing client (for testing).
    ///
    /// `timeout` is only used to describe timeout failures; the client's own
    /// configuration decides when a request is abandoned.
    pub fn with_client(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Configured request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Probe `url` once.
    ///
    /// Only a response with a status below 300 carries a timing sample; every
    /// other outcome reports `response_millis == 0`. The body is never read;
    /// dropping the response closes its connection.
    pub async fn probe(&self, url: &str) -> StatusRecord {
        let start = Instant::now();

        match self.client.get(url).send().await {
            Ok(response) => {
                let elapsed = start.elapsed();
                let status = response.status();
                drop(response);

                if status.as_u16() < 300 {
                    StatusRecord::up(url, status.to_string(), latency_sample(elapsed))
                } else {
                    StatusRecord::down(url, status.to_string())
                }
            }
            Err(e) => {
                let error = classify_error(&e, self.timeout);
                tracing::trace!(url = %url, error = %error, "Probe failed");
                StatusRecord::down(url, error.to_string())
            }
        }
    }
}

/// Milliseconds for a healthy sample, never 0 since 0 marks a down sample.
fn latency_sample(elapsed: Duration) -> u64 {
    (elapsed.as_millis() as u64).max(1)
}

/// Build the HTTP client used for probing.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, ProbeError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("httpoll/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ProbeError::ClientBuild(e.to_string()))
}

/// Classify a reqwest error into a [`ProbeError`].
fn classify_error(e: &reqwest::Error, timeout: Duration) -> ProbeError {
    if e.is_timeout() {
        ProbeError::Timeout(timeout.as_millis() as u64)
    } else if e.is_connect() {
        ProbeError::ConnectionFailed(root_cause(e))
    } else if e.is_builder() {
        ProbeError::InvalidUrl(e.to_string())
    } else {
        ProbeError::RequestFailed(root_cause(e))
    }
}

/// Innermost error message; reqwest wraps the useful part several layers deep.
fn root_cause(e: &reqwest::Error) -> String {
    let mut source: &dyn std::error::Error = e;
    while let Some(next) = source.source() {
        source = next;
    }
    source.to_string()
}
