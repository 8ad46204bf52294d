//! # Rendezvous Node
//!
//! HTTP boundary around [`rv_matchmaker`]: a client posts its endpoints and
//! NAT type, the request blocks until its round resolves, and the response
//! carries every peer of the round with a pair token per peer.
//!
//! - `config` - TOML file plus environment overrides
//! - `wire` - JSON request/response shapes
//! - `http` - axum router and server loop
//! - `client` - reqwest client for the same exchange

pub mod client;
pub mod config;
pub mod http;
pub mod wire;

pub use client::{ClientError, MatchingClient};
pub use config::{ConfigError, NodeConfig};
pub use http::{build_router, serve, shutdown_signal, TIMEOUT_BODY};
pub use wire::{WireJoinRequest, WireMatchResponse, WirePeer, WireStats};
