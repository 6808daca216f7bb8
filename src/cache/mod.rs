//! Cache Module
//!
//! Short-lived in-memory cache of upstream responses keyed by target URL.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use stats::CacheStats;
pub use store::CacheStore;
