//! Proxy Module
//!
//! Target URL validation and outbound upstream fetching.

mod fetcher;
mod validator;

// Re-export public types
pub use fetcher::{FetchedResource, UpstreamFetcher, DEFAULT_CONTENT_TYPE};
pub use validator::{Allowlist, ValidatedUrl};
