//! Durable catalog cache.
//!
//! One JSON file under the cache directory holds the last successful catalog
//! together with the time it was fetched. Reads never fail: a missing,
//! unreadable or unparseable file is reported as "no cache".

use super::clock::Clock;
use crate::file_manager::{read_json_file, remove_json_file, write_json_file, JsonFileError};
use crate::models::{CachedRecord, CatalogPayload, CACHE_DURATION_MS, CACHE_KEY};
use crate::utils::cache_file_path;
use log::{debug, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Serialize)]
struct CachedRecordRef<'a> {
    timestamp: i64,
    data: &'a CatalogPayload,
}

/// Snapshot of the cache for status reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Missing,
    Present { age_ms: i64, valid: bool },
}

pub struct CacheStore {
    path: PathBuf,
    clock: Arc<dyn Clock>,
}

impl CacheStore {
    pub fn new(cache_dir: &Path, clock: Arc<dyn Clock>) -> Self {
        Self {
            path: cache_file_path(cache_dir, CACHE_KEY),
            clock,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Option<CachedRecord> {
        if !self.path.exists() {
            return None;
        }

        match read_json_file::<CachedRecord>(&self.path) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Ignoring unreadable catalog cache: {}", e);
                None
            }
        }
    }

    /// Stores `payload` stamped with the current time, replacing any previous
    /// record. Returns the timestamp written.
    pub fn write(&self, payload: &CatalogPayload) -> Result<i64, JsonFileError> {
        let timestamp = self.clock.now_millis();
        write_json_file(
            &self.path,
            &CachedRecordRef {
                timestamp,
                data: payload,
            },
        )?;
        debug!("Catalog cached at {} ({:?})", timestamp, self.path);
        Ok(timestamp)
    }

    pub fn is_valid(&self, record: &CachedRecord) -> bool {
        record.is_valid_at(self.clock.now_millis())
    }

    pub fn clear(&self) -> Result<bool, JsonFileError> {
        remove_json_file(&self.path)
    }

    pub fn status(&self) -> CacheStatus {
        self.status_of(self.read().as_ref())
    }

    /// Status of a record already read from this store.
    pub fn status_of(&self, record: Option<&CachedRecord>) -> CacheStatus {
        match record {
            None => CacheStatus::Missing,
            Some(record) => {
                let now = self.clock.now_millis();
                CacheStatus::Present {
                    age_ms: record.age_ms(now),
                    valid: record.is_valid_at(now),
                }
            }
        }
    }

    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }

    pub fn ttl_ms(&self) -> i64 {
        CACHE_DURATION_MS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::clock::ManualClock;
    use crate::feed::test_support::portal_payload;
    use std::fs;

    fn store_at(dir: &Path, now: i64) -> (CacheStore, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(now));
        (CacheStore::new(dir, clock.clone()), clock)
    }

    #[test]
    fn test_read_empty_cache() {
        let dir = tempfile::tempdir().unwrap();
        let (store, _) = store_at(dir.path(), 0);

        assert!(store.read().is_none());
        assert_eq!(store.status(), CacheStatus::Missing);
    }

    #[test]
    fn test_corrupt_cache_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let (store, _) = store_at(dir.path(), 0);
        fs::write(store.path(), "{\"timestamp\": 12, \"data\": ").unwrap();

        assert!(store.read().is_none());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let (store, clock) = store_at(dir.path(), 5_000);
        let payload = portal_payload();

        assert_eq!(store.write(&payload).unwrap(), 5_000);
        let record = store.read().unwrap();

        assert_eq!(record.timestamp, 5_000);
        assert_eq!(record.data, payload);
        assert!(store.is_valid(&record));

        clock.advance(CACHE_DURATION_MS - 1);
        assert!(store.is_valid(&record));
        clock.advance(1);
        assert!(!store.is_valid(&record));
        assert_eq!(
            store.status(),
            CacheStatus::Present {
                age_ms: CACHE_DURATION_MS,
                valid: false
            }
        );
    }

    #[test]
    fn test_write_overwrites_and_clear_removes() {
        let dir = tempfile::tempdir().unwrap();
        let (store, clock) = store_at(dir.path(), 1_000);

        store.write(&CatalogPayload::default()).unwrap();
        clock.set(2_000);
        store.write(&portal_payload()).unwrap();

        let record = store.read().unwrap();
        assert_eq!(record.timestamp, 2_000);
        assert_eq!(record.data, portal_payload());

        assert!(store.clear().unwrap());
        assert!(store.read().is_none());
        assert!(!store.clear().unwrap());
    }
}
