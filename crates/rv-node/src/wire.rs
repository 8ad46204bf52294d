//! JSON wire types exchanged with rendezvous clients.
//!
//! Field names follow the format existing clients already speak:
//!
//! ```text
//! request : { "nattype": "FullCone", "endpoint": "203.0.113.7:4000", "local_endpoint": "10.0.0.2:4000" }
//! response: { "id": 17, "peers": [ { "id": 17, "endpoint": "...", "local_endpoint": "...", "randam": "<base64>" } ] }
//! ```
//!
//! `randam` is the historical name of the pair-token field.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use rv_matchmaker::{
    JoinRequest, MatchResponse, MatchStatsSnapshot, NatType, PeerInfo, PoolSnapshot,
};

/// Join request body.
///
/// Missing fields default to empty strings, matching what older servers
/// accepted. The body itself must be a JSON object; see
/// [`WireJoinRequest::from_json`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WireJoinRequest {
    /// Self-reported NAT classification
    #[serde(rename = "nattype", default)]
    pub nat_type: String,
    /// Public endpoint
    #[serde(rename = "endpoint", default)]
    pub public_endpoint: String,
    /// Local endpoint
    #[serde(default)]
    pub local_endpoint: String,
}

impl WireJoinRequest {
    /// Decode a request body.
    ///
    /// Only a JSON object is accepted. The derived decoder would also take a
    /// sequence, and `[]` would then become an empty request.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_slice(body)?;
        if !value.is_object() {
            return Err(serde::de::Error::custom("join request must be a JSON object"));
        }
        serde_json::from_value(value)
    }

    /// Build a request body.
    pub fn new(
        nat_type: NatType,
        public_endpoint: impl Into<String>,
        local_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            nat_type: nat_type.as_str().to_owned(),
            public_endpoint: public_endpoint.into(),
            local_endpoint: local_endpoint.into(),
        }
    }
}

impl From<WireJoinRequest> for JoinRequest {
    fn from(wire: WireJoinRequest) -> Self {
        JoinRequest::new(
            NatType::parse_lossy(&wire.nat_type),
            wire.public_endpoint,
            wire.local_endpoint,
        )
    }
}

/// One peer in a success response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePeer {
    /// Peer identifier
    pub id: u32,
    /// Peer public endpoint
    #[serde(rename = "endpoint")]
    pub public_endpoint: String,
    /// Peer local endpoint
    pub local_endpoint: String,
    /// Base64 pair token
    #[serde(rename = "randam")]
    pub token: String,
}

impl WirePeer {
    /// Decode the pair token into its raw bytes.
    pub fn token_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.token)
    }
}

impl From<PeerInfo> for WirePeer {
    fn from(peer: PeerInfo) -> Self {
        Self {
            id: peer.id.get(),
            public_endpoint: peer.public_endpoint,
            local_endpoint: peer.local_endpoint,
            token: peer.token.into_string(),
        }
    }
}

/// Success response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMatchResponse {
    /// The receiver's own identifier
    pub id: u32,
    /// Every member of the round, receiver included
    pub peers: Vec<WirePeer>,
}

impl WireMatchResponse {
    /// Find a peer by identifier.
    pub fn peer(&self, id: u32) -> Option<&WirePeer> {
        self.peers.iter().find(|peer| peer.id == id)
    }
}

impl From<MatchResponse> for WireMatchResponse {
    fn from(response: MatchResponse) -> Self {
        Self {
            id: response.id.get(),
            peers: response.peers.into_iter().map(WirePeer::from).collect(),
        }
    }
}

/// Body of `GET /stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireStats {
    pub joined: u64,
    pub rounds_full: u64,
    pub rounds_partial: u64,
    pub solo_timeouts: u64,
    pub stale_timers: u64,
    pub undelivered: u64,
    pub waiting: usize,
    pub capacity: usize,
    pub rounds_closed: u64,
}

impl WireStats {
    /// Combine lifetime counters with the current pool view.
    pub fn new(stats: MatchStatsSnapshot, pool: PoolSnapshot) -> Self {
        Self {
            joined: stats.joined,
            rounds_full: stats.rounds_full,
            rounds_partial: stats.rounds_partial,
            solo_timeouts: stats.solo_timeouts,
            stale_timers: stats.stale_timers,
            undelivered: stats.undelivered,
            waiting: pool.waiting,
            capacity: pool.capacity,
            rounds_closed: pool.rounds_closed,
        }
    }
}
