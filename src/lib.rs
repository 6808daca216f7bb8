//! Ops Relay - an allowlisted caching HTTP relay
//!
//! Fetches resources from a fixed set of upstream prefixes on behalf of
//! browser clients, caches them briefly and returns them with permissive
//! CORS headers.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod proxy;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::ProxyError;
pub use tasks::spawn_cleanup_task;
