//! httpoll - HTTP latency monitor
//!
//! Probes a set of HTTP endpoints on independent schedules, keeps a rolling
//! latency window per endpoint, and exposes consistent snapshots for display.
//!
//! - [`probe`]: one timed GET, classified into a [`probe::StatusRecord`]
//! - [`poller`]: per-target schedulers plus the single-writer dispatch loop
//! - [`history`]: the lock-guarded store and the up-average aggregate

pub mod cli;
pub mod config;
pub mod history;
pub mod logging;
pub mod poller;
pub mod probe;
