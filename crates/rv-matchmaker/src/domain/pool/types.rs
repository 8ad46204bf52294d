//! Group pool types.

use crate::domain::{EntryId, MatchOutcome};

/// Identity of one admission into the pool.
///
/// Tickets increase monotonically for the lifetime of a pool, so a timer
/// armed in an earlier round can never be mistaken for a current member,
/// even if random entry IDs collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw sequence number.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A member's terminal result, together with the completion handle it must
/// be delivered through. Each handle appears in exactly one resolution.
#[derive(Debug)]
pub struct Resolution<H> {
    /// Admission this result belongs to
    pub ticket: Ticket,
    /// Public identifier of the member
    pub entry_id: EntryId,
    /// Completion handle, moved out of the pool
    pub handle: H,
    /// Result to deliver
    pub outcome: MatchOutcome,
}

/// Result of admitting an entry.
#[derive(Debug)]
pub enum Admission<H> {
    /// The entry filled the pool; the round closed and these are its results
    Matched(Vec<Resolution<H>>),
    /// The entry is waiting; the caller arms a timer for this ticket
    Waiting(Ticket),
}

/// Result of a timer firing.
#[derive(Debug)]
pub enum Expiry<H> {
    /// The ticket's round already resolved by another path
    Stale,
    /// The ticket waited alone for the full duration
    Alone(Resolution<H>),
    /// Others joined meanwhile; the round closed early with these results
    Closed(Vec<Resolution<H>>),
}

/// Point-in-time view of the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolSnapshot {
    /// Entries waiting in the forming round
    pub waiting: usize,
    /// Members needed to close a round
    pub capacity: usize,
    /// Rounds closed so far (matches and solo timeouts)
    pub rounds_closed: u64,
}
