//! Shared per-target history.
//!
//! The [`HistoryStore`] maps each monitored URL to a [`HistoryEntry`] and is
//! the only mutable state shared between the poller and the display. One
//! reader/writer lock guards the whole map: the dispatcher takes it
//! exclusively for each applied result, readers take it shared for copies.

pub mod average;
mod entry;
mod error;
mod window;


pub use average::up_average;
pub use entry::*;
pub use error::*;
pub use window::*;

use crate::probe::StatusRecord;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Default number of latency samples kept per target.
pub const DEFAULT_WINDOW_SIZE: usize = 50;

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, HistoryEntry>,
    /// Targets in the order they were initialized
    order: Vec<String>,
}

/// Concurrency-safe map from URL to rolling history.
///
/// # Examples
///
/// ```
/// use httpoll::history::HistoryStore;
/// use httpoll::probe::StatusRecord;
///
/// let store = HistoryStore::new(3);
/// store.initialize(["http://a.example"]).unwrap();
///
/// store.apply(StatusRecord::up("http://a.example", "200 OK", 12)).unwrap();
///
/// let snapshot = store.snapshot("http://a.example").unwrap();
/// assert_eq!(snapshot.window, vec![0, 0, 12]);
/// assert!(snapshot.latest.healthy);
/// ```
#[derive(Debug)]
pub struct HistoryStore {
    capacity: usize,
    inner: RwLock<Inner>,
}

impl HistoryStore {
    /// Create an empty store whose windows hold `capacity` samples.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Window capacity shared by every entry.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Create one zero-filled entry per URL.
    ///
    /// Must run before any result is applied. A URL given more than once
    /// keeps a single entry and a single position in [`targets`](Self::targets).
    /// Existing entries are left untouched.
    pub fn initialize<I, S>(&self, urls: I) -> Result<(), HistoryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut guard = self.write()?;
        let inner = &mut *guard;
        for url in urls {
            let url = url.into();
            if let Entry::Vacant(slot) = inner.entries.entry(url.clone()) {
                slot.insert(HistoryEntry::new(&url, self.capacity));
                inner.order.push(url);
            }
        }
        Ok(())
    }

    /// Apply a probe result to its target's entry.
    ///
    /// Returns true when the target's healthy flag changed.
    pub fn apply(&self, record: StatusRecord) -> Result<bool, HistoryError> {
        let mut inner = self.write()?;
        match inner.entries.get_mut(&record.url) {
            Some(entry) => Ok(entry.apply(record)),
            None => Err(HistoryError::UnknownTarget(record.url)),
        }
    }

    /// Copy of one target's latest record and window.
    pub fn snapshot(&self, url: &str) -> Result<Snapshot, HistoryError> {
        let inner = self.read()?;
        inner
            .entries
            .get(url)
            .map(HistoryEntry::snapshot)
            .ok_or_else(|| HistoryError::UnknownTarget(url.to_string()))
    }

    /// Copies of every entry in initialization order, taken under one lock so
    /// the whole frame is consistent.
    pub fn snapshot_all(&self) -> Result<Vec<(String, Snapshot)>, HistoryError> {
        let inner = self.read()?;
        Ok(inner
            .order
            .iter()
            .filter_map(|url| {
                inner
                    .entries
                    .get(url)
                    .map(|entry| (url.clone(), entry.snapshot()))
            })
            .collect())
    }

    /// Monitored URLs in initialization order.
    pub fn targets(&self) -> Result<Vec<String>, HistoryError> {
        Ok(self.read()?.order.clone())
    }

    /// Number of monitored targets.
    pub fn len(&self) -> Result<usize, HistoryError> {
        Ok(self.read()?.entries.len())
    }

    pub fn is_empty(&self) -> Result<bool, HistoryError> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, HistoryError> {
        self.inner.read().map_err(|_| HistoryError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, HistoryError> {
        self.inner.write().map_err(|_| HistoryError::Poisoned)
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE)
    }
}
