//! Upstream fact provider client
//!
//! One bounded-time GET against the configured provider, parsed into a
//! typed [`Fact`]. The client has no state of its own: caching and
//! admission are orchestration concerns layered above it.

use crate::error::FetchError;
use crate::model::Fact;
use async_trait::async_trait;
use std::time::Duration;

/// Anything the access layer can pull a fact from.
///
/// The HTTP client is the production implementation; tests substitute
/// scripted or instrumented sources.
#[async_trait]
pub trait FactSource: Send + Sync {
    async fn fetch(&self) -> Result<Fact, FetchError>;
}

/// Reqwest-backed fact source with a fixed URL and request timeout.
pub struct HttpFactClient {
    client: reqwest::Client,
    url: String,
}

impl HttpFactClient {
    /// Build a client for `url` with request timeout `timeout`. No retries:
    /// one request per `fetch`, bounded by the timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url: url.into() })
    }
}

/// Parse an upstream response body into a fact.
fn decode_fact(body: &str) -> Result<Fact, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))
}

#[async_trait]
impl FactSource for HttpFactClient {
    async fn fetch(&self) -> Result<Fact, FetchError> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            log::warn!("upstream request to {} failed: {}", self.url, e);
            if e.is_timeout() {
                FetchError::Transport("request timed out".to_string())
            } else {
                FetchError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("upstream {} responded with status {}", self.url, status);
            return Err(FetchError::Protocol { status: status.as_u16() });
        }

        let body = response.text().await.map_err(|e| FetchError::Transport(e.to_string()))?;
        decode_fact(&body)
    }
}
