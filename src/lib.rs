//! Cached viewer for free and discounted games.
//!
//! The catalog is fetched from `GET {api_url}/free-games`, kept in a JSON
//! cache for 30 minutes, and rendered as one of three views: the permanent
//! catalog, time-limited giveaways, and discounts.

pub mod cli;
pub mod commands;
pub mod feed;
pub mod file_manager;
pub mod logging;
pub mod models;
pub mod state;
pub mod utils;
pub mod views;

pub use cli::run;
pub use feed::{CacheStore, CatalogLoader, CatalogSource, HttpCatalogSource, LoadError, LoadOrigin, Loaded};
pub use models::{CachedRecord, CatalogPayload, GameEntry, Settings, StoreCatalog, ViewId};
pub use state::{AppState, LoadState};
pub use views::{CatalogFilter, ViewDispatcher};
