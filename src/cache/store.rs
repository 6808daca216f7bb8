//! Cache Store Module
//!
//! Response cache keyed by validated target URL, with lazy TTL expiry and a
//! bounded entry count.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::http::HeaderValue;
use tracing::debug;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// In-memory response cache with TTL expiry and oldest-expiry-first eviction.
#[derive(Debug)]
pub struct CacheStore {
    /// URL-keyed storage
    entries: HashMap<String, CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// TTL in seconds for entries stored without an explicit TTL
    default_ttl: u64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and default TTL.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries the cache can hold (at least 1)
    /// * `default_ttl` - TTL in seconds applied by `set` when none is given
    pub fn new(max_entries: usize, default_ttl: u64) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            max_entries: max_entries.max(1),
            default_ttl,
        }
    }

    /// Returns the TTL applied when `set` receives none.
    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    // == Set ==
    /// Stores or overwrites the response cached under `key`.
    ///
    /// Overwriting resets the expiry. Inserting a new key into a full store
    /// first drops expired entries, then evicts the entry expiring soonest.
    ///
    /// # Arguments
    /// * `key` - The validated target URL
    /// * `body` - Upstream response body
    /// * `content_type` - Upstream content type header value
    /// * `ttl` - Optional TTL in seconds (uses default_ttl if None)
    pub fn set(&mut self, key: String, body: Bytes, content_type: HeaderValue, ttl: Option<u64>) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            self.make_room();
        }

        let entry = CacheEntry::new(body, content_type, ttl.unwrap_or(self.default_ttl));
        self.entries.insert(key, entry);

        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Returns the entry for `key` if present and unexpired.
    ///
    /// Expired entries behave as absent but stay stored until overwritten,
    /// evicted or swept.
    pub fn get(&mut self, key: &str) -> Option<CacheEntry> {
        self.get_at(key, current_timestamp_ms())
    }

    /// Same as `get`, evaluated at an explicit Unix millisecond timestamp.
    pub fn get_at(&mut self, key: &str, now_ms: u64) -> Option<CacheEntry> {
        match self.entries.get(key) {
            Some(entry) if !entry.is_expired_at(now_ms) => {
                self.stats.record_hit();
                Some(entry.clone())
            }
            Some(_) => {
                self.stats.record_expired_miss();
                None
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = current_timestamp_ms();
        let before = self.entries.len();

        self.entries.retain(|_, entry| !entry.is_expired_at(now));

        self.stats.set_total_entries(self.entries.len());
        before - self.entries.len()
    }

    // == Length ==
    /// Returns the current number of entries in the cache, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn make_room(&mut self) {
        let expired = self.cleanup_expired();
        if expired > 0 {
            debug!("Dropped {} expired entries to make room", expired);
        }
        if self.entries.len() < self.max_entries {
            return;
        }

        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.expires_at)
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest {
            self.entries.remove(&key);
            self.stats.record_eviction();
            debug!(key = %key, "Evicted cache entry");
        }
    }
}
