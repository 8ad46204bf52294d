//! Domain Layer - Pure round-formation logic with no I/O
//!
//! This module contains:
//! - Entry descriptors and the identifiers handed out at join time
//! - Pair-token derivation (SHA-256 over a canonical pair ordering)
//! - The response shapes delivered to each member
//! - The round state machine (`GroupPool`): join, match, timeout resolution

pub mod entry;
pub mod errors;
pub mod pool;
pub mod response;
pub mod token;

pub use entry::*;
pub use errors::*;
pub use pool::*;
pub use response::*;
pub use token::*;
