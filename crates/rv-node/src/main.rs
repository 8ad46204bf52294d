//! Rendezvous node binary.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rv_matchmaker::{MatchmakerService, RandomIdentitySource, TokioRoundTimer};
use rv_node::{build_router, serve, shutdown_signal, NodeConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = NodeConfig::from_env().context("Failed to load configuration")?;
    let round = config.round_config();

    let timer = TokioRoundTimer::try_current().context("No Tokio runtime for round timers")?;
    let identities = Arc::new(RandomIdentitySource::new());
    let service = MatchmakerService::new(round, Arc::new(timer), identities)
        .context("Invalid round configuration")?;

    let addr = config.listen_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(
        addr = %addr,
        capacity = round.capacity,
        wait_ms = round.wait.as_millis() as u64,
        "Rendezvous node listening"
    );

    let router = build_router(Arc::new(service), config.server.max_body_bytes);
    serve(listener, router, shutdown_signal())
        .await
        .context("Server error")?;

    info!("Rendezvous node stopped");
    Ok(())
}
