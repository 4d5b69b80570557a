//! HTTP client for the Sharenet spots endpoint.
//!
//! Issues a single `GET` per call with no retries. The whole exchange is
//! bounded by the timeout given at construction.

use std::time::Duration;

use async_trait::async_trait;
use sharenet_core::spot::{Spot, SpotListing};

use crate::source::SpotSource;

/// Errors from fetching the spots listing.
#[derive(Debug, thiserror::Error)]
pub enum SpotsError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The upstream did not answer within the configured timeout.
    #[error("Spots request timed out after {0:?}")]
    Timeout(Duration),

    /// Upstream returned a non-2xx status code.
    #[error("Spots API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The body was not a `{ "spots": [...] }` document.
    #[error("Malformed spots response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Fetches spots over HTTP from a configurable endpoint.
#[derive(Debug, Clone)]
pub struct HttpSpotSource {
    client: reqwest::Client,
    api_url: String,
    timeout: Duration,
}

impl HttpSpotSource {
    /// Create a client for `api_url` whose requests give up after `timeout`.
    pub fn new(api_url: String, timeout: Duration) -> Result<Self, SpotsError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SpotsError::Request)?;
        Ok(Self {
            client,
            api_url,
            timeout,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn classify(&self, err: reqwest::Error) -> SpotsError {
        if err.is_timeout() {
            SpotsError::Timeout(self.timeout)
        } else {
            SpotsError::Request(err)
        }
    }
}

#[async_trait]
impl SpotSource for HttpSpotSource {
    async fn fetch_spots(&self) -> Result<Vec<Spot>, SpotsError> {
        let response = self
            .client
            .get(&self.api_url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(status = status.as_u16(), url = %self.api_url, "Spots API returned an error status");
            return Err(SpotsError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;
        let listing: SpotListing = serde_json::from_str(&body)?;
        tracing::debug!(count = listing.spots.len(), "Fetched spots");
        Ok(listing.spots)
    }
}
