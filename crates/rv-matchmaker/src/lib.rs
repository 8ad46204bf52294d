//! # Rendezvous Matchmaker
//!
//! Collects a fixed-size group of clients that want to learn each other's
//! endpoints for direct peer-to-peer connection establishment. When the
//! group is complete, or when a member's wait expires with at least one
//! other member present, every member receives the peer list together with
//! a per-pair token that both sides of a pair can recompute.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture with:
//! - **Domain Layer:** Entry descriptors, pair-token derivation and the
//!   round state machine (`GroupPool`). No I/O, no locking.
//! - **Ports Layer:** `MatchmakerApi` (driving), `RoundTimer` and
//!   `IdentitySource` (driven)
//! - **Service Layer:** `MatchmakerService`, the lock plus completion
//!   channels around the pool
//! - **Adapters Layer:** Tokio timer and OS-random identities
//!
//! ## Example
//!
//! ```rust
//! use rv_matchmaker::{Admission, Entry, EntryId, GroupPool, JoinRequest, NatType, OrderingKey};
//!
//! let mut pool: GroupPool<&'static str> = GroupPool::new(2);
//! let request = JoinRequest::new(NatType::FullCone, "203.0.113.7:4000", "10.0.0.2:4000");
//!
//! let a = Entry::new(EntryId::new(1), OrderingKey::new(10), request.clone());
//! let b = Entry::new(EntryId::new(2), OrderingKey::new(20), request);
//!
//! assert!(matches!(pool.admit(a, "a"), Admission::Waiting(_)));
//! match pool.admit(b, "b") {
//!     Admission::Matched(resolutions) => assert_eq!(resolutions.len(), 2),
//!     Admission::Waiting(_) => unreachable!("second arrival fills a pool of two"),
//! }
//! assert!(pool.is_empty());
//! ```

// =============================================================================
// CORE MODULES
// =============================================================================

pub mod domain;
pub mod ports;
pub mod service;

/// Runtime adapters for the driven ports.
pub mod adapters;

/// Deterministic timer and identity sources.
/// Requires feature: `test-utils`
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// =============================================================================
// RE-EXPORTS
// =============================================================================

// Domain
pub use domain::{
    pair_token, Admission, Entry, EntryId, Expiry, GroupPool, JoinRequest, MatchError,
    MatchOutcome, MatchResponse, NatType, OrderingKey, PairToken, PeerInfo, PoolSnapshot,
    Resolution, RoundConfig, RoundConfigError, Ticket, TOKEN_DIGEST_LEN,
};

// Port traits
pub use ports::{IdentitySource, MatchmakerApi, RoundTimer, TimerCallback};

// Service
pub use service::{MatchStats, MatchStatsSnapshot, MatchmakerService, PendingMatch};

// Adapters
pub use adapters::{RandomIdentitySource, TokioRoundTimer};

#[cfg(any(test, feature = "test-utils"))]
pub use test_utils::{ManualRoundTimer, ScriptedIdentitySource};
