// Application state, built once at startup and passed to every command
use crate::feed::{CacheStore, CatalogLoader, Clock, HttpCatalogSource, LoadError, Loaded, SystemClock};
use crate::models::{CatalogPayload, ConfigError, Settings, ViewId};
use crate::views::{CatalogFilter, ViewDispatcher};
use parking_lot::{Mutex, MutexGuard, RwLock};
use std::path::Path;
use std::sync::Arc;

/// What the page currently holds.
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loaded(Loaded),
    Failed(LoadError),
}

pub struct AppState {
    settings: Settings,
    clock: Arc<dyn Clock>,
    loader: CatalogLoader,
    load_state: RwLock<LoadState>,
    dispatcher: Mutex<ViewDispatcher>,
    filter: RwLock<CatalogFilter>,
}

impl AppState {
    pub fn new(settings: Settings, loader: CatalogLoader, clock: Arc<dyn Clock>) -> Self {
        Self {
            settings,
            clock,
            loader,
            load_state: RwLock::new(LoadState::Idle),
            dispatcher: Mutex::new(ViewDispatcher::new()),
            filter: RwLock::new(CatalogFilter::default()),
        }
    }

    /// Wires the HTTP source and the on-disk cache from settings.
    pub fn from_settings(settings: Settings, cache_dir: &Path) -> Result<Self, ConfigError> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let source = HttpCatalogSource::from_settings(&settings)?;
        let cache = CacheStore::new(cache_dir, clock.clone());
        let loader = CatalogLoader::new(Box::new(source), cache);
        Ok(Self::new(settings, loader, clock))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn loader(&self) -> &CatalogLoader {
        &self.loader
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state.read().clone()
    }

    pub fn set_load_state(&self, state: LoadState) {
        *self.load_state.write() = state;
    }

    pub fn catalog(&self) -> Option<Arc<CatalogPayload>> {
        match &*self.load_state.read() {
            LoadState::Loaded(loaded) => Some(loaded.catalog.clone()),
            _ => None,
        }
    }

    pub fn dispatcher(&self) -> MutexGuard<'_, ViewDispatcher> {
        self.dispatcher.lock()
    }

    pub fn active_view(&self) -> ViewId {
        self.dispatcher.lock().active()
    }

    pub fn filter(&self) -> CatalogFilter {
        self.filter.read().clone()
    }

    pub fn set_filter(&self, filter: CatalogFilter) {
        *self.filter.write() = filter;
    }
}
