use thiserror::Error;

/// Errors from the history store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// A thread panicked while holding the store lock
    #[error("history store lock poisoned")]
    Poisoned,

    /// No entry exists for the URL
    #[error("unknown target: {0}")]
    UnknownTarget(String),
}
