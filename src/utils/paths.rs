use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static APP_DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Overrides the application data root. Only the first call wins, and it must
/// happen before anything reads a path.
pub fn set_app_data_dir(dir: impl Into<PathBuf>) -> bool {
    APP_DATA_DIR.set(dir.into()).is_ok()
}

pub fn get_app_data_dir() -> PathBuf {
    APP_DATA_DIR
        .get_or_init(|| {
            let base_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
            base_dir.join("GameFeed")
        })
        .clone()
}

pub fn get_data_dir() -> PathBuf {
    get_app_data_dir().join("data")
}

pub fn get_cache_dir() -> PathBuf {
    get_app_data_dir().join("cache")
}

pub fn get_logs_dir() -> PathBuf {
    get_app_data_dir().join("logs")
}

pub fn get_settings_json_path() -> PathBuf {
    get_data_dir().join("settings.json")
}

/// Location of the catalog cache for a given storage key.
pub fn cache_file_path(cache_dir: &Path, key: &str) -> PathBuf {
    cache_dir.join(format!("{}.json", key))
}

pub fn initialize_data_directories() -> Result<(), String> {
    let directories = [get_data_dir(), get_cache_dir(), get_logs_dir()];

    for dir in &directories {
        if !dir.exists() {
            fs::create_dir_all(dir)
                .map_err(|e| format!("Failed to create directory {:?}: {}", dir, e))?;
            log::debug!("Created directory: {:?}", dir);
        }
    }

    log::debug!("Data directories initialized at: {:?}", get_app_data_dir());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_file_path() {
        let path = cache_file_path(Path::new("/tmp/feed"), "freeGamesCache");
        assert_eq!(path, PathBuf::from("/tmp/feed/freeGamesCache.json"));
    }
}
