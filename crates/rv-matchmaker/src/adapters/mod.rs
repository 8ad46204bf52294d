//! # Runtime Adapters
//!
//! Production implementations of the driven ports.
//!
//! - `TokioRoundTimer` - round timer backed by `tokio::time::sleep`
//! - `RandomIdentitySource` - 31-bit identifiers from the thread RNG

// Semantic submodules
/// Identifier sources
pub mod identity;
/// Timer adapters
pub mod timer;

// Re-export public API
pub use identity::RandomIdentitySource;
pub use timer::TokioRoundTimer;
