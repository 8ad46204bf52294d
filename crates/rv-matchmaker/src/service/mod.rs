//! # Matchmaker Service
//!
//! Wraps the domain `GroupPool` in a single mutex, gives every entry a
//! one-shot completion channel and arms one round timer per waiting entry.
//!
//! ## Flow
//!
//! ```text
//! transport ──JoinRequest──→ submit()
//!                              │
//!                              ├─ draw (EntryId, OrderingKey)
//!                              ├─ lock pool → admit
//!                              │     ├─ pool full → round closes → deliver all
//!                              │     └─ waiting   → (unlock) arm timer(ticket)
//!                              └─ PendingMatch ──wait()──→ MatchOutcome
//!
//! timer fires ──→ lock pool → expire(ticket) → (unlock) deliver / ignore stale
//! ```
//!
//! Results are sent after the lock is released. Sending on a one-shot
//! channel never blocks, and a receiver that has gone away only affects its
//! own entry.

// Semantic submodules
mod api;
mod core;
mod stats;
mod timeout;

// Re-export public API
pub use api::PendingMatch;
pub use self::core::MatchmakerService;
pub use stats::{MatchStats, MatchStatsSnapshot};

#[cfg(test)]
mod tests;
