//! Upstream Fetcher Module
//!
//! Performs outbound GET requests against validated upstream URLs.

use std::time::Duration;

use axum::body::Bytes;
use axum::http::HeaderValue;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

use crate::error::{ProxyError, Result};
use crate::proxy::ValidatedUrl;

/// Content type reported when the upstream omits one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

// == Fetched Resource ==
/// Body and content type of a successful upstream response.
#[derive(Debug, Clone)]
pub struct FetchedResource {
    pub body: Bytes,
    /// Upstream header value as received, bytes untouched
    pub content_type: HeaderValue,
}

// == Upstream Fetcher ==
/// Outbound HTTP client with a fixed total timeout and User-Agent.
///
/// Redirects are followed using reqwest's default policy (up to 10 hops).
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct UpstreamFetcher {
    client: reqwest::Client,
}

impl UpstreamFetcher {
    // == Constructor ==
    /// Builds a fetcher with the given total timeout and User-Agent.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| ProxyError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    // == Fetch ==
    /// Issues a GET to `url` and returns its body and content type.
    ///
    /// Non-2xx statuses become `Upstream`, timeouts become `Timeout` and any
    /// other transport failure becomes `Fetch`.
    pub async fn fetch(&self, url: &ValidatedUrl) -> Result<FetchedResource> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Upstream returned error status");
            return Err(ProxyError::Upstream {
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));

        let body = response.bytes().await.map_err(|e| classify(url, e))?;
        debug!(url = %url, bytes = body.len(), content_type = ?content_type, "Fetched upstream resource");

        Ok(FetchedResource { body, content_type })
    }
}

fn classify(url: &ValidatedUrl, err: reqwest::Error) -> ProxyError {
    warn!(url = %url, error = %err, "Upstream fetch failed");
    if err.is_timeout() {
        ProxyError::Timeout(err.to_string())
    } else {
        ProxyError::Fetch(err.to_string())
    }
}
