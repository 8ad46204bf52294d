//! Client side of the rendezvous exchange.

use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

use crate::wire::{WireJoinRequest, WireMatchResponse};

/// Failures seen by a client asking for a match.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Nobody else joined before the server's wait expired
    #[error("matching timeout")]
    Timeout,

    /// Server answered with an unexpected status
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Posts join requests to a rendezvous node.
#[derive(Debug, Clone)]
pub struct MatchingClient {
    http: reqwest::Client,
    url: String,
}

impl MatchingClient {
    /// Client for the node at `url` (the join route, e.g. `http://host:8080/`).
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    /// Reuse an existing reqwest client.
    pub fn with_client(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Join the forming round and wait for its result.
    pub async fn request_match(
        &self,
        request: &WireJoinRequest,
    ) -> Result<WireMatchResponse, ClientError> {
        let response = self.http.post(&self.url).json(request).send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %self.url, "Join answered");

        match status {
            StatusCode::OK => Ok(response.json().await?),
            StatusCode::REQUEST_TIMEOUT => Err(ClientError::Timeout),
            other => Err(ClientError::Status {
                status: other.as_u16(),
                body: response.text().await.unwrap_or_default(),
            }),
        }
    }
}
