// Catalog loading: cache store, remote source and the loader tying them together
pub mod cache_store;
pub mod clock;
pub mod error;
pub mod loader;
pub mod source;

pub use cache_store::{CacheStatus, CacheStore};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::LoadError;
pub use loader::{CatalogLoader, LoadOrigin, Loaded};
pub use source::{CatalogSource, HttpCatalogSource};
