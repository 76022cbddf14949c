//! Error types for the poller.

use crate::history::HistoryError;
use crate::probe::ProbeError;
use thiserror::Error;

/// Fatal poller failures. Individual probe failures never surface here.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("no targets to poll")]
    NoTargets,

    #[error("invalid poll settings: {0}")]
    InvalidSettings(String),

    #[error(transparent)]
    Client(#[from] ProbeError),

    #[error("history store failure: {0}")]
    Store(#[from] HistoryError),
}
