//! HTTP transport for the matchmaker.
//!
//! One handler task per request; each blocks on its entry's result and
//! writes it back. The matchmaker itself never sees a connection.

use std::future::Future;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{debug, info, warn};

use rv_matchmaker::{MatchError, MatchmakerApi};

use crate::wire::{WireJoinRequest, WireMatchResponse, WireStats};

/// Body sent with a `408` when an entry waited alone.
pub const TIMEOUT_BODY: &str = "matching timeout";

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    matchmaker: Arc<dyn MatchmakerApi>,
}

/// Build the node router.
pub fn build_router(matchmaker: Arc<dyn MatchmakerApi>, max_body_bytes: usize) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(max_body_bytes));

    Router::new()
        .route("/", post(handle_join))
        .route("/health", get(health_check))
        .route("/stats", get(handle_stats))
        .layer(middleware)
        .with_state(AppState { matchmaker })
}

/// Serve `router` until `shutdown` completes.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal"),
        Err(e) => warn!(error = %e, "Failed to listen for shutdown signal"),
    }
}

// The body is read raw: existing clients post JSON as text/plain.
async fn handle_join(State(state): State<AppState>, body: Bytes) -> Response {
    let request = match WireJoinRequest::from_json(&body) {
        Ok(request) => request,
        Err(e) => {
            debug!(error = %e, "Rejecting malformed join request");
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    match state.matchmaker.join(request.into()).await {
        Ok(response) => Json(WireMatchResponse::from(response)).into_response(),
        Err(MatchError::Timeout) => (StatusCode::REQUEST_TIMEOUT, TIMEOUT_BODY).into_response(),
        Err(e @ MatchError::Abandoned) => {
            (StatusCode::SERVICE_UNAVAILABLE, e.to_string()).into_response()
        }
    }
}

async fn handle_stats(State(state): State<AppState>) -> Json<WireStats> {
    Json(WireStats::new(state.matchmaker.stats(), state.matchmaker.pool()))
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "rv-node",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
