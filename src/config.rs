//! Configuration Module
//!
//! Handles loading and managing relay configuration from environment variables.

use std::env;
use std::path::PathBuf;

// == Defaults ==
/// Upstream prefixes the relay accepts when `PROXY_ALLOWLIST` is unset.
pub const DEFAULT_ALLOWLIST: [&str; 5] = [
    "https://services.arcgis.com/",
    "https://services9.arcgis.com/",
    "https://maps.nccs.nasa.gov/",
    "https://flood-api.open-meteo.com/",
    "https://overpass-api.de/",
];

/// User-Agent sent with every upstream request.
pub const DEFAULT_USER_AGENT: &str = "CubaOpsTwin/1.1";

const DEFAULT_SERVER_PORT: u16 = 8000;
const DEFAULT_CACHE_TTL: u64 = 60;
const DEFAULT_FETCH_TIMEOUT: u64 = 30;
const DEFAULT_MAX_ENTRIES: usize = 1000;
const DEFAULT_CLEANUP_INTERVAL: u64 = 30;
const DEFAULT_STATIC_DIR: &str = "public";

/// Relay configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Seconds a fetched response stays servable from cache
    pub cache_ttl: u64,
    /// Total upstream request timeout in seconds
    pub fetch_timeout: u64,
    /// Maximum number of cached responses
    pub max_entries: usize,
    /// Background sweep interval in seconds, 0 disables the sweep
    pub cleanup_interval: u64,
    /// Permitted upstream URL prefixes, in order
    pub allowlist: Vec<String>,
    /// Outbound User-Agent header value
    pub user_agent: String,
    /// Directory holding the frontend bundle
    pub static_dir: PathBuf,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `CACHE_TTL` - Cache TTL in seconds (default: 60)
    /// - `FETCH_TIMEOUT` - Upstream timeout in seconds (default: 30)
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `CLEANUP_INTERVAL` - Expired entry sweep in seconds, 0 = off (default: 30)
    /// - `PROXY_ALLOWLIST` - Comma-separated URL prefixes (default: built-in list)
    /// - `USER_AGENT` - Outbound User-Agent (default: `CubaOpsTwin/1.1`)
    /// - `STATIC_DIR` - Frontend bundle directory (default: `public`)
    pub fn from_env() -> Self {
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(DEFAULT_SERVER_PORT),
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(DEFAULT_CACHE_TTL),
            fetch_timeout: parse_var("FETCH_TIMEOUT").unwrap_or(DEFAULT_FETCH_TIMEOUT),
            max_entries: parse_var("MAX_ENTRIES").unwrap_or(DEFAULT_MAX_ENTRIES),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(DEFAULT_CLEANUP_INTERVAL),
            allowlist: env::var("PROXY_ALLOWLIST")
                .ok()
                .map(|v| parse_allowlist(&v))
                .filter(|list| !list.is_empty())
                .unwrap_or_else(default_allowlist),
            user_agent: env::var("USER_AGENT")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATIC_DIR)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: DEFAULT_SERVER_PORT,
            cache_ttl: DEFAULT_CACHE_TTL,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            max_entries: DEFAULT_MAX_ENTRIES,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
            allowlist: default_allowlist(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

/// Splits a comma-separated prefix list, dropping blank items.
pub fn parse_allowlist(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

fn default_allowlist() -> Vec<String> {
    DEFAULT_ALLOWLIST.iter().map(|p| p.to_string()).collect()
}
