//! # Group Pool
//!
//! Fixed-capacity collector of entries for the round currently forming.
//!
//! ## Resolution Rules
//!
//! - **Join**: append; if the pool is now full, close the round at once
//!   (no timer for the last arrival), otherwise the caller arms a timer.
//! - **Timeout**: empty pool or unknown ticket is a stale callback and does
//!   nothing; a lone member fails with `MatchError::Timeout`; otherwise the
//!   round closes early with whoever is present.
//! - **Match**: every member gets a peer list covering all current members,
//!   itself included, then the pool resets for the next round.
//!
//! The pool is not synchronized. `MatchmakerService` keeps it behind a
//! single mutex.

// Semantic submodules
mod config;
mod manager;
mod types;

// Re-export public API
pub use config::RoundConfig;
pub use manager::GroupPool;
pub use types::{Admission, Expiry, PoolSnapshot, Resolution, Ticket};
