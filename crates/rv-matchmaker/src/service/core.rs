use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::warn;

use super::stats::MatchStats;
use crate::domain::{GroupPool, MatchOutcome, Resolution, RoundConfig, RoundConfigError};
use crate::ports::{IdentitySource, RoundTimer};

/// Completion handle held by the pool for each waiting entry.
pub(crate) type Completion = oneshot::Sender<MatchOutcome>;

/// State shared between the service and its armed timers.
///
/// Timers hold a `Weak` reference, so dropping every service handle turns
/// outstanding timers into no-ops and closes the waiting receivers.
pub(crate) struct Shared {
    /// The forming round. The only lock in the coordinator.
    pub(crate) pool: Mutex<GroupPool<Completion>>,
    /// Lifetime counters
    pub(crate) stats: MatchStats,
}

impl Shared {
    /// Send each result through its completion handle.
    ///
    /// A receiver that is already gone (the client disconnected) is logged
    /// and skipped; the remaining members are still delivered.
    pub(crate) fn deliver(&self, resolutions: Vec<Resolution<Completion>>) {
        for resolution in resolutions {
            if resolution.handle.send(resolution.outcome).is_err() {
                self.stats.record_undelivered();
                warn!(
                    entry_id = %resolution.entry_id,
                    ticket = resolution.ticket.get(),
                    "Result receiver dropped before delivery"
                );
            }
        }
    }
}

/// Rendezvous coordinator implementing the driving port.
///
/// Cheap to clone; clones share one pool. Owned by the transport boundary
/// rather than living in a global, so capacity and wait are injected.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use rv_matchmaker::{MatchmakerService, RandomIdentitySource, RoundConfig, TokioRoundTimer};
///
/// let service = MatchmakerService::new(
///     RoundConfig::default(),
///     Arc::new(TokioRoundTimer::try_current()?),
///     Arc::new(RandomIdentitySource::new()),
/// )?;
/// let outcome = service.submit(request).wait().await;
/// ```
#[derive(Clone)]
pub struct MatchmakerService {
    /// Pool and counters
    pub(crate) shared: Arc<Shared>,
    /// Round capacity and wait
    pub(crate) config: RoundConfig,
    /// Per-entry round timer
    pub(crate) timer: Arc<dyn RoundTimer>,
    /// Identifier source for new entries
    pub(crate) identities: Arc<dyn IdentitySource>,
}

impl MatchmakerService {
    /// Create a coordinator.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` has a zero capacity or a zero wait.
    pub fn new(
        config: RoundConfig,
        timer: Arc<dyn RoundTimer>,
        identities: Arc<dyn IdentitySource>,
    ) -> Result<Self, RoundConfigError> {
        config.validate()?;

        Ok(Self {
            shared: Arc::new(Shared {
                pool: Mutex::new(GroupPool::new(config.capacity)),
                stats: MatchStats::default(),
            }),
            config,
            timer,
            identities,
        })
    }

    /// Round configuration in use.
    pub fn config(&self) -> RoundConfig {
        self.config
    }

    /// Lifetime counters.
    pub fn match_stats(&self) -> &MatchStats {
        &self.shared.stats
    }
}
