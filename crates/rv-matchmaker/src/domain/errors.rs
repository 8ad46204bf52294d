//! Domain errors for round formation.

use thiserror::Error;

/// Terminal failure delivered to a waiting entry instead of a peer list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatchError {
    /// The entry waited the full duration without any other member joining
    #[error("matching timeout")]
    Timeout,
    /// The coordinator was dropped before this entry's round resolved
    #[error("matchmaker shut down before the round resolved")]
    Abandoned,
}

/// Invalid round configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundConfigError {
    /// A round must hold at least one member
    #[error("round capacity must be at least 1")]
    ZeroCapacity,
    /// A zero wait would expire every entry immediately
    #[error("round wait must be greater than zero")]
    ZeroWait,
}
