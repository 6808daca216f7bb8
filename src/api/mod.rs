//! API Module
//!
//! HTTP handlers and routing for the relay.
//!
//! # Endpoints
//! - `GET /proxy?url=...` - Fetch an allowlisted upstream resource through the cache
//! - `OPTIONS /proxy` - CORS preflight acknowledgment
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint
//! - anything else - static frontend bundle, when mounted

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{create_app, create_router};
