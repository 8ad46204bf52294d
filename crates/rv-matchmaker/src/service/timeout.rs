use tracing::{debug, info};

use super::core::Shared;
use crate::domain::{Expiry, Ticket};

impl Shared {
    /// Handle a fired round timer for `ticket`.
    ///
    /// Runs the pool's timeout policy under the lock, then delivers outside
    /// it. Timers for rounds that already resolved are counted and ignored.
    pub(crate) fn on_timer_fired(&self, ticket: Ticket) {
        let expiry = self.pool.lock().expire(ticket);

        match expiry {
            Expiry::Stale => {
                self.stats.record_stale_timer();
                debug!(ticket = ticket.get(), "Ignoring stale round timer");
            }
            Expiry::Alone(resolution) => {
                self.stats.record_solo_timeout();
                info!(entry_id = %resolution.entry_id, "Entry timed out without a partner");
                self.deliver(vec![resolution]);
            }
            Expiry::Closed(resolutions) => {
                self.stats.record_round_partial();
                info!(
                    members = resolutions.len(),
                    ticket = ticket.get(),
                    "Round closed early by timer"
                );
                self.deliver(resolutions);
            }
        }
    }
}
