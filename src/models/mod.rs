//! Request and Response models for the relay API
//!
//! This module defines the DTOs used for parsing query strings and
//! serializing JSON response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::ProxyQuery;
pub use responses::{ErrorResponse, HealthResponse, StatsResponse};
