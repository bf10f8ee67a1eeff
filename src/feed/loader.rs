// Cache-then-fetch catalog loader
use super::cache_store::CacheStore;
use super::error::LoadError;
use super::source::CatalogSource;
use crate::models::CatalogPayload;
use log::{debug, info, warn};
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;

type SharedResult = Result<Loaded, LoadError>;

/// Where a successfully loaded catalog came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    Cache { age_ms: i64 },
    Network,
}

#[derive(Debug, Clone)]
pub struct Loaded {
    pub catalog: Arc<CatalogPayload>,
    pub origin: LoadOrigin,
}

/// One network request that any number of callers can wait on.
#[derive(Default)]
struct InFlight {
    result: Mutex<Option<SharedResult>>,
    ready: Condvar,
}

impl InFlight {
    fn complete(&self, result: SharedResult) {
        *self.result.lock() = Some(result);
        self.ready.notify_all();
    }

    fn wait(&self) -> SharedResult {
        let mut result = self.result.lock();
        while result.is_none() {
            self.ready.wait(&mut result);
        }
        result.clone().unwrap_or_else(|| Err(LoadError::network("load aborted")))
    }
}

/// Releases waiters even if the fetch panics.
struct LeaderGuard<'a> {
    slot: &'a Mutex<Option<Arc<InFlight>>>,
    flight: Arc<InFlight>,
    finished: bool,
}

impl LeaderGuard<'_> {
    fn finish(mut self, result: SharedResult) {
        self.slot.lock().take();
        self.flight.complete(result);
        self.finished = true;
    }
}

impl Drop for LeaderGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.slot.lock().take();
            self.flight.complete(Err(LoadError::network("load aborted")));
        }
    }
}

/// Loads the catalog from the cache while it is fresh, otherwise from the
/// source. Concurrent callers share a single request.
pub struct CatalogLoader {
    source: Box<dyn CatalogSource>,
    cache: CacheStore,
    in_flight: Mutex<Option<Arc<InFlight>>>,
}

impl CatalogLoader {
    pub fn new(source: Box<dyn CatalogSource>, cache: CacheStore) -> Self {
        Self {
            source,
            cache,
            in_flight: Mutex::new(None),
        }
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub fn load(&self) -> Result<Arc<CatalogPayload>, LoadError> {
        self.load_report().map(|loaded| loaded.catalog)
    }

    /// Like [`load`](Self::load) but also reports whether the data came from
    /// the cache.
    pub fn load_report(&self) -> Result<Loaded, LoadError> {
        if let Some(loaded) = self.fresh_cache() {
            return Ok(loaded);
        }
        self.fetch_shared(true)
    }

    /// Skips the cache and always fetches, still sharing an in-flight request.
    pub fn reload(&self) -> Result<Arc<CatalogPayload>, LoadError> {
        self.fetch_shared(false).map(|loaded| loaded.catalog)
    }

    fn fresh_cache(&self) -> Option<Loaded> {
        let record = self.cache.read()?;
        if !self.cache.is_valid(&record) {
            debug!("Catalog cache expired");
            return None;
        }

        let age_ms = record.age_ms(self.cache.now_millis());
        debug!("Catalog cache hit ({} ms old)", age_ms);
        Some(Loaded {
            catalog: Arc::new(record.data),
            origin: LoadOrigin::Cache { age_ms },
        })
    }

    /// Joins the running request, or becomes the leader and runs one. A
    /// leader that honours the cache checks it again before fetching.
    fn fetch_shared(&self, use_cache: bool) -> SharedResult {
        let (flight, leader) = {
            let mut slot = self.in_flight.lock();
            match slot.as_ref() {
                Some(flight) => (flight.clone(), false),
                None => {
                    let flight = Arc::new(InFlight::default());
                    *slot = Some(flight.clone());
                    (flight, true)
                }
            }
        };

        if !leader {
            debug!("Joining in-flight catalog request");
            return flight.wait();
        }

        let guard = LeaderGuard {
            slot: &self.in_flight,
            flight,
            finished: false,
        };
        let cached = if use_cache { self.fresh_cache() } else { None };
        let result = match cached {
            Some(loaded) => Ok(loaded),
            None => self.fetch_and_store(),
        };
        guard.finish(result.clone());
        result
    }

    fn fetch_and_store(&self) -> SharedResult {
        info!("Fetching catalog from {}", self.source.describe());

        let payload = self.source.fetch().map_err(|e| {
            warn!("Catalog fetch failed: {}", e);
            e
        })?;

        if let Err(e) = self.cache.write(&payload) {
            warn!("Failed to write catalog cache: {}", e);
        }

        info!("Catalog loaded: {} games", payload.total_games());
        Ok(Loaded {
            catalog: Arc::new(payload),
            origin: LoadOrigin::Network,
        })
    }
}
