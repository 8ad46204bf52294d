//! Lifetime counters for the coordinator.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters updated as entries join and rounds resolve.
#[derive(Debug, Default)]
pub struct MatchStats {
    /// Entries admitted
    joined: AtomicU64,
    /// Rounds closed because the pool filled
    rounds_full: AtomicU64,
    /// Rounds closed early by a member's timer
    rounds_partial: AtomicU64,
    /// Entries that waited alone and timed out
    solo_timeouts: AtomicU64,
    /// Timers that fired after their round had resolved
    stale_timers: AtomicU64,
    /// Results whose receiver was gone at delivery time
    undelivered: AtomicU64,
}

/// Plain copy of [`MatchStats`] at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchStatsSnapshot {
    /// Entries admitted
    pub joined: u64,
    /// Rounds closed because the pool filled
    pub rounds_full: u64,
    /// Rounds closed early by a member's timer
    pub rounds_partial: u64,
    /// Entries that waited alone and timed out
    pub solo_timeouts: u64,
    /// Timers that fired after their round had resolved
    pub stale_timers: u64,
    /// Results whose receiver was gone at delivery time
    pub undelivered: u64,
}

impl MatchStats {
    pub(crate) fn record_join(&self) {
        self.joined.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_round_full(&self) {
        self.rounds_full.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_round_partial(&self) {
        self.rounds_partial.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_solo_timeout(&self) {
        self.solo_timeouts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_stale_timer(&self) {
        self.stale_timers.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_undelivered(&self) {
        self.undelivered.fetch_add(1, Ordering::Relaxed);
    }

    /// Read every counter.
    pub fn snapshot(&self) -> MatchStatsSnapshot {
        MatchStatsSnapshot {
            joined: self.joined.load(Ordering::Relaxed),
            rounds_full: self.rounds_full.load(Ordering::Relaxed),
            rounds_partial: self.rounds_partial.load(Ordering::Relaxed),
            solo_timeouts: self.solo_timeouts.load(Ordering::Relaxed),
            stale_timers: self.stale_timers.load(Ordering::Relaxed),
            undelivered: self.undelivered.load(Ordering::Relaxed),
        }
    }
}
