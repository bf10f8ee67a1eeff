// Cached catalog record
use super::CatalogPayload;
use serde::{Deserialize, Serialize};

/// Storage key of the catalog cache.
pub const CACHE_KEY: &str = "freeGamesCache";

/// How long a cached catalog stays valid: 30 minutes.
pub const CACHE_DURATION_MS: i64 = 30 * 60 * 1000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CachedRecord {
    pub timestamp: i64, // Unix timestamp in milliseconds
    pub data: CatalogPayload,
}

impl CachedRecord {
    pub fn new(data: CatalogPayload, timestamp: i64) -> Self {
        Self { timestamp, data }
    }

    /// Milliseconds since the record was written. Negative for records stamped
    /// in the future. Saturates, since the timestamp comes from disk.
    pub fn age_ms(&self, now: i64) -> i64 {
        now.saturating_sub(self.timestamp)
    }

    pub fn is_valid_at(&self, now: i64) -> bool {
        self.age_ms(now) < CACHE_DURATION_MS
    }
}
