//! Logging setup for Game Feed
//! Installs env_logger and handles log file cleanup for 7-day retention

use crate::utils::get_logs_dir;
use log::{info, LevelFilter};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

const LOG_RETENTION_DAYS: u64 = 7;

/// Daily log file, e.g. `game-feed-2026-10-15.log`.
pub fn log_file_path(logs_dir: &Path) -> PathBuf {
    let today = chrono::Local::now().format("%Y-%m-%d");
    logs_dir.join(format!("game-feed-{}.log", today))
}

/// Logs go to stderr, or appended to today's file in the logs directory when
/// `to_file` is set. `RUST_LOG` still overrides `level`.
pub fn init_logging(level: LevelFilter, to_file: bool) -> Result<(), String> {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis();

    if to_file {
        let logs_dir = get_logs_dir();
        fs::create_dir_all(&logs_dir)
            .map_err(|e| format!("Failed to create logs directory {:?}: {}", logs_dir, e))?;
        let path = log_file_path(&logs_dir);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| format!("Failed to open log file {:?}: {}", path, e))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder
        .try_init()
        .map_err(|e| format!("Failed to initialize logger: {}", e))?;

    if to_file {
        cleanup_old_logs(&get_logs_dir());
    }
    Ok(())
}

pub fn cleanup_old_logs(logs_dir: &Path) -> usize {
    if !logs_dir.exists() {
        return 0;
    }

    let retention = Duration::from_secs(LOG_RETENTION_DAYS * 24 * 60 * 60);
    let now = SystemTime::now();
    let mut removed = 0;

    if let Ok(entries) = fs::read_dir(logs_dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "log") {
                let expired = fs::metadata(&path)
                    .and_then(|meta| meta.modified())
                    .ok()
                    .and_then(|modified| now.duration_since(modified).ok())
                    .map_or(false, |age| age > retention);
                if expired && fs::remove_file(&path).is_ok() {
                    info!("Cleaned up old log: {:?}", path.file_name());
                    removed += 1;
                }
            }
        }
    }

    removed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_keeps_recent_logs() {
        let dir = tempfile::tempdir().unwrap();
        let recent = log_file_path(dir.path());
        fs::write(&recent, "started\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "keep").unwrap();

        assert_eq!(cleanup_old_logs(dir.path()), 0);
        assert!(recent.exists());
        assert_eq!(cleanup_old_logs(&dir.path().join("missing")), 0);
    }

    #[test]
    fn test_log_file_name() {
        let path = log_file_path(Path::new("/var/log/feed"));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("game-feed-") && name.ends_with(".log"));
    }
}
