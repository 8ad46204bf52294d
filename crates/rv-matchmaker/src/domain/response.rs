//! Results delivered to each member when a round resolves.

use super::entry::{Entry, EntryId};
use super::errors::MatchError;
use super::token::{pair_token, PairToken};

/// One peer as seen by a specific member of the round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerInfo {
    /// Peer's public identifier
    pub id: EntryId,
    /// Peer's public endpoint
    pub public_endpoint: String,
    /// Peer's local endpoint
    pub local_endpoint: String,
    /// Token shared between the receiving member and this peer
    pub token: PairToken,
}

impl PeerInfo {
    /// Describe `peer` from the point of view of `member`.
    pub fn for_member(member: &Entry, peer: &Entry) -> Self {
        Self {
            id: peer.id(),
            public_endpoint: peer.public_endpoint().to_owned(),
            local_endpoint: peer.local_endpoint().to_owned(),
            token: pair_token(member, peer),
        }
    }
}

/// Personalized success result for one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResponse {
    /// The member's own identifier
    pub id: EntryId,
    /// Every member of the round, in join order, the receiver included
    pub peers: Vec<PeerInfo>,
}

impl MatchResponse {
    /// Find a peer by identifier.
    pub fn peer(&self, id: EntryId) -> Option<&PeerInfo> {
        self.peers.iter().find(|peer| peer.id == id)
    }

    /// Peers other than the receiver itself.
    pub fn others(&self) -> impl Iterator<Item = &PeerInfo> {
        let own = self.id;
        self.peers.iter().filter(move |peer| peer.id != own)
    }
}

/// What a waiting caller eventually receives.
pub type MatchOutcome = Result<MatchResponse, MatchError>;
