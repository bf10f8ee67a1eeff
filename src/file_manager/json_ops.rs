// Atomic JSON file operations

use parking_lot::Mutex;
use serde::{de::DeserializeOwned, Serialize};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

lazy_static::lazy_static! {
    static ref FILE_LOCK: Mutex<()> = Mutex::new(());
}

#[derive(Debug, Error)]
pub enum JsonFileError {
    #[error("file not found: {0:?}")]
    NotFound(PathBuf),
    #[error("i/o error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize data: {0}")]
    Serialize(#[source] serde_json::Error),
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> JsonFileError + '_ {
    move |source| JsonFileError::Io {
        path: path.to_path_buf(),
        source,
    }
}

pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, JsonFileError> {
    let _lock = FILE_LOCK.lock();

    if !path.exists() {
        return Err(JsonFileError::NotFound(path.to_path_buf()));
    }

    let mut file = File::open(path).map_err(io_err(path))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(io_err(path))?;

    serde_json::from_str(&contents).map_err(|source| JsonFileError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes JSON atomically using write-to-temp-then-rename
pub fn write_json_file<T: Serialize>(path: &Path, data: &T) -> Result<(), JsonFileError> {
    let _lock = FILE_LOCK.lock();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err(parent))?;
    }

    let json_string = serde_json::to_string_pretty(data).map_err(JsonFileError::Serialize)?;

    let temp_path = path.with_extension("tmp");

    let mut temp_file = File::create(&temp_path).map_err(io_err(&temp_path))?;
    temp_file
        .write_all(json_string.as_bytes())
        .map_err(io_err(&temp_path))?;
    temp_file.sync_all().map_err(io_err(&temp_path))?;

    fs::rename(&temp_path, path).map_err(io_err(path))?;

    Ok(())
}

pub fn initialize_json_file<T: Serialize>(path: &Path, default: &T) -> Result<(), JsonFileError> {
    if !path.exists() {
        log::info!("Initializing JSON file: {:?}", path);
        write_json_file(path, default)?;
    }
    Ok(())
}

/// Removes a JSON file. A missing file is not an error.
pub fn remove_json_file(path: &Path) -> Result<bool, JsonFileError> {
    let _lock = FILE_LOCK.lock();

    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(JsonFileError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
