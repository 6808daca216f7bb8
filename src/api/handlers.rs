//! API Handlers
//!
//! HTTP request handlers for the relay endpoints.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, warn};

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::{ProxyError, Result};
use crate::models::{HealthResponse, ProxyQuery, StatsResponse};
use crate::proxy::{Allowlist, UpstreamFetcher};

/// Application state shared across all handlers.
///
/// The cache is the only mutable piece; it is never locked across an
/// upstream fetch.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe response cache
    pub cache: Arc<RwLock<CacheStore>>,
    /// Outbound HTTP client
    pub fetcher: UpstreamFetcher,
    /// Permitted upstream prefixes
    pub allowlist: Arc<Allowlist>,
}

impl AppState {
    /// Creates a new AppState from its collaborators.
    pub fn new(cache: CacheStore, fetcher: UpstreamFetcher, allowlist: Allowlist) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            fetcher,
            allowlist: Arc::new(allowlist),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the cache, the upstream client and the allowlist.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = CacheStore::new(config.max_entries, config.cache_ttl);
        let fetcher = UpstreamFetcher::new(
            Duration::from_secs(config.fetch_timeout),
            &config.user_agent,
        )?;
        let allowlist = Allowlist::new(config.allowlist.iter().cloned());
        Ok(Self::new(cache, fetcher, allowlist))
    }
}

/// Handler for GET /proxy?url=...
///
/// Validates the target, serves an unexpired cached copy if there is one,
/// otherwise fetches it upstream and caches the result. Failures are never
/// cached. Malformed query strings are reported as `InvalidUrl` so every
/// rejection carries the same JSON body and CORS header.
pub async fn proxy_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<ProxyQuery>, QueryRejection>,
) -> Result<Response> {
    let Query(query) = query.map_err(|e| ProxyError::InvalidUrl(e.body_text()))?;

    let target = state
        .allowlist
        .validate(query.target()?)
        .inspect_err(|e| warn!(error = %e, "Rejected proxy target"))?;

    // Write lock: lookups update hit/miss counters
    let (cached, ttl) = {
        let mut cache = state.cache.write().await;
        (cache.get(target.as_str()), cache.default_ttl())
    };

    if let Some(entry) = cached {
        debug!(url = %target, ttl_remaining_ms = entry.ttl_remaining_ms(), "Cache hit");
        return Ok(relay_response(entry.body, entry.content_type, ttl));
    }

    debug!(url = %target, "Cache miss, fetching upstream");
    let fetched = state.fetcher.fetch(&target).await?;

    state.cache.write().await.set(
        target.into_inner(),
        fetched.body.clone(),
        fetched.content_type.clone(),
        None,
    );

    Ok(relay_response(fetched.body, fetched.content_type, ttl))
}

/// Handler for OPTIONS /proxy
///
/// Static CORS preflight acknowledgment.
pub async fn preflight_handler() -> Response {
    (
        StatusCode::NO_CONTENT,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "GET,OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "*"),
        ],
    )
        .into_response()
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.read().await.stats();
    Json(StatsResponse::from(&stats))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Builds the 200 response shared by cache hits and fresh fetches.
///
/// The upstream content type is relayed byte-for-byte.
fn relay_response(body: Bytes, content_type: HeaderValue, max_age: u64) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*")),
        ],
        [(header::CACHE_CONTROL, format!("public, max-age={}", max_age))],
        body,
    )
        .into_response()
}
