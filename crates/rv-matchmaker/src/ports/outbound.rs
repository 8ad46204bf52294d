//! # Driven Ports (Outbound SPI)
//!
//! Interfaces the coordinator requires from the host application.

use std::time::Duration;

use crate::domain::{EntryId, OrderingKey};

/// Callback run when an armed timer fires.
pub type TimerCallback = Box<dyn FnOnce() + Send + 'static>;

/// Schedules the per-entry round timer.
///
/// Armed timers are never cancelled. When a round resolves early the
/// callback still runs and the pool treats it as stale.
///
/// # Example Implementation
///
/// ```rust,ignore
/// struct ThreadTimer;
///
/// impl RoundTimer for ThreadTimer {
///     fn arm(&self, wait: Duration, on_fire: TimerCallback) {
///         std::thread::spawn(move || {
///             std::thread::sleep(wait);
///             on_fire();
///         });
///     }
/// }
/// ```
pub trait RoundTimer: Send + Sync {
    /// Run `on_fire` once, after `wait` has elapsed.
    fn arm(&self, wait: Duration, on_fire: TimerCallback);
}

/// Source of the identifiers assigned to each joining client.
pub trait IdentitySource: Send + Sync {
    /// Draw a public identifier and an independent ordering key.
    fn next_identity(&self) -> (EntryId, OrderingKey);
}
