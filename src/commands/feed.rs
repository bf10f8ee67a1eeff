// Catalog loading commands
use crate::feed::{CacheStatus, CacheStore, LoadError, LoadOrigin, Loaded};
use crate::file_manager::JsonFileError;
use crate::state::{AppState, LoadState};
use log::{error, info};

/// Summary for the `status` command. Built from the cache file alone.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheReport {
    pub status: CacheStatus,
    pub ttl_ms: i64,
    pub games: usize,
    pub platforms: Vec<String>,
    pub stores: Vec<String>,
}

fn record_outcome(state: &AppState, result: Result<Loaded, LoadError>) -> Result<Loaded, LoadError> {
    match &result {
        Ok(loaded) => {
            match loaded.origin {
                LoadOrigin::Cache { age_ms } => {
                    info!("Showing cached catalog ({} s old)", age_ms / 1000)
                }
                LoadOrigin::Network => info!("Showing fresh catalog"),
            }
            state.set_load_state(LoadState::Loaded(loaded.clone()));
        }
        Err(e) => {
            error!("Failed to load games: {}", e);
            state.set_load_state(LoadState::Failed(e.clone()));
        }
    }
    result
}

/// Cache-then-fetch load into the application state.
pub fn load_catalog(state: &AppState) -> Result<Loaded, LoadError> {
    let result = state.loader().load_report();
    record_outcome(state, result)
}

/// The "try again" action. Safe to call any number of times.
pub fn retry_load(state: &AppState) -> Result<Loaded, LoadError> {
    info!("Retrying catalog load");
    load_catalog(state)
}

/// Fetch regardless of cache age.
pub fn refresh_catalog(state: &AppState) -> Result<Loaded, LoadError> {
    let result = state.loader().reload().map(|catalog| Loaded {
        catalog,
        origin: LoadOrigin::Network,
    });
    record_outcome(state, result)
}

pub fn cache_report(cache: &CacheStore) -> CacheReport {
    let record = cache.read();
    let (games, platforms, stores) = match &record {
        Some(record) => (
            record.data.total_games(),
            record.data.platforms().into_iter().collect(),
            record.data.stores().into_iter().collect(),
        ),
        None => (0, Vec::new(), Vec::new()),
    };

    CacheReport {
        status: cache.status_of(record.as_ref()),
        ttl_ms: cache.ttl_ms(),
        games,
        platforms,
        stores,
    }
}

pub fn clear_cache(cache: &CacheStore) -> Result<bool, JsonFileError> {
    let removed = cache.clear()?;
    if removed {
        info!("Catalog cache cleared");
    }
    Ok(removed)
}
