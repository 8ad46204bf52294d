//! Test utilities for the matchmaker.
//!
//! Deterministic implementations of the driven ports, so tests can decide
//! exactly when a round timer fires and which identifiers an entry gets.
//! Enable with the `test-utils` feature flag.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use rv_matchmaker::test_utils::ManualRoundTimer;
//! use rv_matchmaker::RoundTimer;
//!
//! let timer = ManualRoundTimer::new();
//! timer.arm(Duration::from_secs(3), Box::new(|| {}));
//! assert_eq!(timer.armed_count(), 1);
//! assert!(timer.fire_next());
//! assert_eq!(timer.armed_count(), 0);
//! ```

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

use crate::domain::{EntryId, OrderingKey};
use crate::ports::{IdentitySource, RoundTimer, TimerCallback};

/// Round timer that only fires when told to.
///
/// Armed callbacks are queued in arming order. Firing runs the callback on
/// the calling thread, outside the internal lock.
#[derive(Default)]
pub struct ManualRoundTimer {
    armed: Mutex<VecDeque<(Duration, TimerCallback)>>,
}

impl ManualRoundTimer {
    /// Create a timer with nothing armed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of timers armed and not yet fired.
    pub fn armed_count(&self) -> usize {
        self.armed.lock().len()
    }

    /// Waits of the timers still armed, oldest first.
    pub fn pending_waits(&self) -> Vec<Duration> {
        self.armed.lock().iter().map(|(wait, _)| *wait).collect()
    }

    /// Fire the oldest armed timer. Returns false if none was armed.
    pub fn fire_next(&self) -> bool {
        let next = self.armed.lock().pop_front();
        match next {
            Some((_, callback)) => {
                callback();
                true
            }
            None => false,
        }
    }

    /// Fire every armed timer in arming order. Returns how many fired.
    pub fn fire_all(&self) -> usize {
        let drained: Vec<_> = self.armed.lock().drain(..).collect();
        let count = drained.len();
        for (_, callback) in drained {
            callback();
        }
        count
    }
}

impl RoundTimer for ManualRoundTimer {
    fn arm(&self, wait: Duration, on_fire: TimerCallback) {
        self.armed.lock().push_back((wait, on_fire));
    }
}

impl std::fmt::Debug for ManualRoundTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualRoundTimer")
            .field("armed", &self.armed_count())
            .finish()
    }
}

/// Hands out a fixed script of `(id, ordering key)` pairs, then sequential
/// pairs once the script runs out.
#[derive(Debug)]
pub struct ScriptedIdentitySource {
    script: Mutex<VecDeque<(EntryId, OrderingKey)>>,
    fallback: AtomicU32,
}

impl ScriptedIdentitySource {
    /// Create a source that yields `pairs` in order.
    pub fn new(pairs: impl IntoIterator<Item = (u32, u32)>) -> Self {
        Self {
            script: Mutex::new(
                pairs
                    .into_iter()
                    .map(|(id, key)| (EntryId::new(id), OrderingKey::new(key)))
                    .collect(),
            ),
            fallback: AtomicU32::new(1_000_000),
        }
    }

    /// Pairs left in the script.
    pub fn remaining(&self) -> usize {
        self.script.lock().len()
    }
}

impl IdentitySource for ScriptedIdentitySource {
    fn next_identity(&self) -> (EntryId, OrderingKey) {
        if let Some(pair) = self.script.lock().pop_front() {
            return pair;
        }
        let next = self.fallback.fetch_add(1, Ordering::Relaxed);
        (EntryId::new(next), OrderingKey::new(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    #[test]
    fn test_manual_timer_fires_in_arming_order() {
        let timer = ManualRoundTimer::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for i in 0..3 {
            let order = Arc::clone(&order);
            timer.arm(Duration::from_millis(i), Box::new(move || order.lock().push(i)));
        }

        assert_eq!(timer.fire_all(), 3);
        assert_eq!(*order.lock(), vec![0, 1, 2]);
        assert!(!timer.fire_next());
    }

    #[test]
    fn test_manual_timer_callback_may_rearm() {
        let timer = Arc::new(ManualRoundTimer::new());
        let fired = Arc::new(AtomicUsize::new(0));
        let inner_timer = Arc::clone(&timer);
        let inner_fired = Arc::clone(&fired);

        timer.arm(
            Duration::from_secs(1),
            Box::new(move || {
                inner_fired.fetch_add(1, Ordering::SeqCst);
                inner_timer.arm(Duration::from_secs(1), Box::new(|| {}));
            }),
        );

        assert!(timer.fire_next());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(timer.armed_count(), 1);
    }

    #[test]
    fn test_scripted_identities_then_fallback() {
        let source = ScriptedIdentitySource::new([(1, 10), (2, 20)]);

        assert_eq!(source.next_identity(), (EntryId::new(1), OrderingKey::new(10)));
        assert_eq!(source.next_identity(), (EntryId::new(2), OrderingKey::new(20)));
        assert_eq!(source.remaining(), 0);

        let (id, key) = source.next_identity();
        assert_eq!(id.get(), 1_000_000);
        assert_eq!(key.get(), 1_000_000);
    }
}
