//! Group pool implementation.

use super::types::{Admission, Expiry, PoolSnapshot, Resolution, Ticket};
use crate::domain::{Entry, MatchError, MatchResponse, PeerInfo};

/// A member of the forming round and the handle its result goes through.
#[derive(Debug)]
struct Member<H> {
    ticket: Ticket,
    entry: Entry,
    handle: H,
}

/// Collects entries for the current round and resolves it.
///
/// `H` is the completion handle type. The pool owns each handle from
/// admission until the member's round resolves, then moves it out inside a
/// [`Resolution`]. A handle is never handed out twice.
#[derive(Debug)]
pub struct GroupPool<H> {
    /// Members of the forming round, in join order
    members: Vec<Member<H>>,
    /// Members needed to close a round
    capacity: usize,
    /// Next ticket to hand out
    next_ticket: u64,
    /// Rounds closed so far
    rounds_closed: u64,
}

impl<H> GroupPool<H> {
    /// Create an empty pool. A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            members: Vec::new(),
            capacity,
            next_ticket: 0,
            rounds_closed: 0,
        }
    }

    /// Members needed to close a round.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Members currently waiting.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when no round is forming.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Rounds closed so far.
    pub fn rounds_closed(&self) -> u64 {
        self.rounds_closed
    }

    /// True if `ticket` is waiting in the forming round.
    pub fn contains(&self, ticket: Ticket) -> bool {
        self.members.iter().any(|m| m.ticket == ticket)
    }

    /// Point-in-time view.
    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            waiting: self.members.len(),
            capacity: self.capacity,
            rounds_closed: self.rounds_closed,
        }
    }

    /// Admit an entry into the forming round.
    ///
    /// If this arrival fills the pool the round closes immediately and the
    /// results are returned. Otherwise the caller must arm a timer that
    /// later calls [`GroupPool::expire`] with the returned ticket.
    pub fn admit(&mut self, entry: Entry, handle: H) -> Admission<H> {
        let ticket = Ticket::new(self.next_ticket);
        self.next_ticket += 1;

        self.members.push(Member {
            ticket,
            entry,
            handle,
        });

        if self.members.len() >= self.capacity {
            return Admission::Matched(self.close_round());
        }

        Admission::Waiting(ticket)
    }

    /// Resolve a fired timer.
    ///
    /// Checked in order: an empty pool is stale; a lone member that is this
    /// ticket times out; any other round containing this ticket closes
    /// early; a ticket that is not present is stale.
    pub fn expire(&mut self, ticket: Ticket) -> Expiry<H> {
        if self.members.is_empty() {
            return Expiry::Stale;
        }

        if self.members.len() == 1 && self.members[0].ticket == ticket {
            let member = self.members.remove(0);
            self.rounds_closed += 1;
            return Expiry::Alone(Resolution {
                ticket: member.ticket,
                entry_id: member.entry.id(),
                handle: member.handle,
                outcome: Err(MatchError::Timeout),
            });
        }

        if self.contains(ticket) {
            return Expiry::Closed(self.close_round());
        }

        Expiry::Stale
    }

    /// Close the forming round with whoever is present.
    ///
    /// Each member gets a response listing every current member (itself
    /// included) with the pair token for that member. The pool is empty
    /// afterwards.
    pub fn close_round(&mut self) -> Vec<Resolution<H>> {
        let members = std::mem::take(&mut self.members);
        if members.is_empty() {
            return Vec::new();
        }
        self.rounds_closed += 1;

        let responses: Vec<MatchResponse> = members
            .iter()
            .map(|member| MatchResponse {
                id: member.entry.id(),
                peers: members
                    .iter()
                    .map(|peer| PeerInfo::for_member(&member.entry, &peer.entry))
                    .collect(),
            })
            .collect();

        members
            .into_iter()
            .zip(responses)
            .map(|(member, response)| Resolution {
                ticket: member.ticket,
                entry_id: member.entry.id(),
                handle: member.handle,
                outcome: Ok(response),
            })
            .collect()
    }
}
