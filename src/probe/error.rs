//! Error types for probing.

use thiserror::Error;

/// Local failures while probing a target.
///
/// The `Display` text of a probe failure becomes the `status_text` of the
/// resulting [`StatusRecord`](super::StatusRecord).
#[derive(Debug, Clone, Error)]
pub enum ProbeError {
    /// Request did not complete within the client timeout
    #[error("request timeout after {0}ms")]
    Timeout(u64),

    /// Connection could not be established (refused, DNS, TLS)
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// URL could not be turned into a request
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Any other transport failure
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}
