use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tracing::{debug, info};

use super::core::MatchmakerService;
use super::stats::MatchStatsSnapshot;
use crate::domain::{
    Admission, Entry, EntryId, JoinRequest, MatchError, MatchOutcome, PoolSnapshot,
};
use crate::ports::MatchmakerApi;

/// A submitted entry waiting for its round to resolve.
#[derive(Debug)]
pub struct PendingMatch {
    entry_id: EntryId,
    receiver: oneshot::Receiver<MatchOutcome>,
    /// Set once `try_outcome` has handed the result out
    taken: bool,
}

impl PendingMatch {
    /// Identifier assigned to this entry.
    pub fn entry_id(&self) -> EntryId {
        self.entry_id
    }

    /// Wait for the entry's result.
    ///
    /// Yields `MatchError::Abandoned` if the coordinator was dropped while
    /// the entry was still waiting, or if `try_outcome` already took the
    /// result.
    pub async fn wait(self) -> MatchOutcome {
        self.receiver.await.unwrap_or(Err(MatchError::Abandoned))
    }

    /// Take the result if it has already been delivered.
    ///
    /// Returns `Some` at most once; after that the result has been consumed
    /// and every later call returns `None`.
    pub fn try_outcome(&mut self) -> Option<MatchOutcome> {
        if self.taken {
            return None;
        }
        let outcome = match self.receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Closed) => Err(MatchError::Abandoned),
        };
        self.taken = true;
        Some(outcome)
    }
}

impl MatchmakerService {
    /// Admit a client into the forming round.
    ///
    /// If this arrival fills the pool, every member of the round (this one
    /// included) has its result before `submit` returns and no timer is
    /// armed. Otherwise a round timer is armed after the pool lock has been
    /// released.
    pub fn submit(&self, request: JoinRequest) -> PendingMatch {
        let (entry_id, ordering_key) = self.identities.next_identity();
        let entry = Entry::new(entry_id, ordering_key, request);
        debug!(
            entry_id = %entry_id,
            nat_type = %entry.nat_type(),
            public_endpoint = entry.public_endpoint(),
            local_endpoint = entry.local_endpoint(),
            "Entry joining"
        );

        let (sender, receiver) = oneshot::channel();
        self.shared.stats.record_join();

        let admission = self.shared.pool.lock().admit(entry, sender);

        match admission {
            Admission::Matched(resolutions) => {
                self.shared.stats.record_round_full();
                info!(members = resolutions.len(), "Round closed at capacity");
                self.shared.deliver(resolutions);
            }
            Admission::Waiting(ticket) => {
                let shared = Arc::downgrade(&self.shared);
                self.timer.arm(
                    self.config.wait,
                    Box::new(move || {
                        if let Some(shared) = shared.upgrade() {
                            shared.on_timer_fired(ticket);
                        }
                    }),
                );
            }
        }

        PendingMatch {
            entry_id,
            receiver,
            taken: false,
        }
    }
}

#[async_trait]
impl MatchmakerApi for MatchmakerService {
    async fn join(&self, request: JoinRequest) -> MatchOutcome {
        self.submit(request).wait().await
    }

    fn stats(&self) -> MatchStatsSnapshot {
        self.shared.stats.snapshot()
    }

    fn pool(&self) -> PoolSnapshot {
        self.shared.pool.lock().snapshot()
    }
}
