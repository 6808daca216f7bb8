//! Error types for the relay
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Proxy Error Enum ==
/// Unified error type for the relay.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Missing, empty or non-http(s) target URL; holds the reason
    #[error("Invalid url: {0}")]
    InvalidUrl(String),

    /// Well-formed target outside the allowlist
    #[error("URL '{0}' not allowed by proxy allowlist")]
    NotAllowed(String),

    /// Upstream answered with a non-2xx status
    #[error("Upstream responded with status {status}")]
    Upstream { status: u16 },

    /// Connection or transport failure reaching the upstream
    #[error("Upstream fetch failed: {0}")]
    Fetch(String),

    /// Upstream did not answer within the fetch timeout
    #[error("Upstream timed out: {0}")]
    Timeout(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProxyError {
    /// HTTP status reported to the client for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::InvalidUrl(_) | ProxyError::NotAllowed(_) => StatusCode::BAD_REQUEST,
            ProxyError::Upstream { .. } | ProxyError::Fetch(_) => StatusCode::BAD_GATEWAY,
            ProxyError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::new(self.to_string()));

        (
            status,
            [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
            body,
        )
            .into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the relay.
pub type Result<T> = std::result::Result<T, ProxyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_bad_request() {
        assert_eq!(
            ProxyError::InvalidUrl("unsupported scheme".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ProxyError::NotAllowed("https://evil.com/".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_upstream_errors_map_to_gateway_statuses() {
        assert_eq!(
            ProxyError::Upstream { status: 503 }.status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ProxyError::Fetch("connection refused".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ProxyError::Timeout("30s".into()).status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ProxyError::NotAllowed("https://evil.com/".into()).to_string(),
            "URL 'https://evil.com/' not allowed by proxy allowlist"
        );
        assert!(ProxyError::Upstream { status: 503 }
            .to_string()
            .contains("503"));
    }

    #[test]
    fn test_into_response_sets_cors_header() {
        let response = ProxyError::InvalidUrl("missing url parameter".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }
}
