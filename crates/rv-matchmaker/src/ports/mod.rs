//! # Ports Layer - Hexagonal Architecture Boundaries
//!
//! - **Driving Ports (Inbound):** the API the transport boundary calls
//! - **Driven Ports (Outbound):** what the coordinator needs from its host
//!   (a timer and a source of identifiers)

pub mod inbound;
pub mod outbound;

pub use inbound::MatchmakerApi;
pub use outbound::{IdentitySource, RoundTimer, TimerCallback};
