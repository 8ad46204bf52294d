//! # Driving Ports (Inbound API)
//!
//! The API the transport boundary uses once it has parsed a join request.

use async_trait::async_trait;

use crate::domain::{JoinRequest, MatchOutcome, PoolSnapshot};
use crate::service::MatchStatsSnapshot;

/// Primary API of the rendezvous coordinator.
///
/// # Example
///
/// ```rust,ignore
/// use rv_matchmaker::{JoinRequest, MatchmakerApi, NatType};
///
/// async fn handle<T: MatchmakerApi + ?Sized>(api: &T) {
///     let request = JoinRequest::new(NatType::FullCone, "203.0.113.7:4000", "10.0.0.2:4000");
///     match api.join(request).await {
///         Ok(response) => println!("matched with {} peers", response.peers.len()),
///         Err(e) => println!("no match: {e}"),
///     }
/// }
/// ```
#[async_trait]
pub trait MatchmakerApi: Send + Sync {
    /// Admit a client into the forming round and wait for its result.
    ///
    /// Resolves exactly once, either with a personalized peer list or with
    /// `MatchError::Timeout` if the client waited alone for the full
    /// duration.
    async fn join(&self, request: JoinRequest) -> MatchOutcome;

    /// Lifetime counters.
    fn stats(&self) -> MatchStatsSnapshot;

    /// Current state of the forming round.
    fn pool(&self) -> PoolSnapshot;
}
