//! Request DTOs for the relay API
//!
//! Defines the structure of incoming query strings.

use serde::Deserialize;

use crate::error::{ProxyError, Result};

/// Query string of the proxy endpoint (GET /proxy?url=...)
///
/// `url` is optional at the extractor level so a missing parameter is
/// reported through the relay's own error body rather than axum's rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProxyQuery {
    /// Percent-decoded absolute target URL
    #[serde(default)]
    pub url: Option<String>,
}

impl ProxyQuery {
    /// Returns the target URL or `InvalidUrl` when the parameter is absent.
    pub fn target(&self) -> Result<&str> {
        self.url
            .as_deref()
            .ok_or_else(|| ProxyError::InvalidUrl("missing url parameter".to_string()))
    }
}
