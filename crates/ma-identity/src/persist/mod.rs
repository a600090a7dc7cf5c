mod error;

pub use error::{PersistError, Result as PersistResult};

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

const DATE_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Result of loading a file - distinguishes "not found" from corruption.
#[derive(Debug)]
pub struct LoadResult<T> {
    pub value: Option<T>,
    /// Present if the file exists but doesn't parse
    pub corruption_error: Option<String>,
}

/// A single JSON document on disk, written atomically.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the document.
    ///
    /// Returns:
    /// - `Ok(LoadResult { value: Some(...), corruption_error: None })` - loaded
    /// - `Ok(LoadResult { value: None, corruption_error: None })` - no file yet
    /// - `Ok(LoadResult { value: None, corruption_error: Some(...) })` - unparseable
    pub fn load<T: DeserializeOwned>(&self) -> PersistResult<LoadResult<T>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(LoadResult {
                    value: None,
                    corruption_error: None,
                });
            }
            Err(e) => return Err(PersistError::file_read(self.path.clone(), e)),
        };

        match serde_json::from_str::<T>(&contents) {
            Ok(value) => Ok(LoadResult {
                value: Some(value),
                corruption_error: None,
            }),
            Err(e) => {
                warn!("File corrupted at {:?}: {e}", self.path);
                Ok(LoadResult {
                    value: None,
                    corruption_error: Some(e.to_string()),
                })
            }
        }
    }

    /// Save using the atomic write pattern.
    ///
    /// 1. Writes to temp file
    /// 2. Syncs to disk (fsync)
    /// 3. Atomic rename to final location
    pub fn save<T: Serialize>(&self, value: &T) -> PersistResult<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir).map_err(|e| PersistError::dir_creation(dir.to_path_buf(), e))?;
        }

        let temp_path = self.temp_path();

        let json = serde_json::to_string_pretty(value)
            .map_err(|e| PersistError::serialization(self.path.clone(), e))?;

        {
            let mut file = fs::File::create(&temp_path)
                .map_err(|e| PersistError::file_write(temp_path.clone(), e))?;

            file.write_all(json.as_bytes())
                .map_err(|e| PersistError::file_write(temp_path.clone(), e))?;

            file.sync_all()
                .map_err(|e| PersistError::file_write(temp_path.clone(), e))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            PersistError::atomic_rename(temp_path, self.path.clone(), e)
        })?;

        Ok(())
    }

    /// Delete the document. Returns whether a file was removed.
    pub fn remove(&self) -> PersistResult<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(PersistError::file_remove(self.path.clone(), e)),
        }
    }

    /// Move a corrupted document aside as `<name>.corrupted.<timestamp>`.
    pub fn backup_corrupted(&self) -> PersistResult<Option<PathBuf>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let timestamp = chrono::Utc::now().format(DATE_FORMAT);
        let mut backup_name = self.path.as_os_str().to_owned();
        backup_name.push(format!(".corrupted.{timestamp}"));
        let backup_path = PathBuf::from(backup_name);

        fs::rename(&self.path, &backup_path)
            .map_err(|e| PersistError::backup_failed(self.path.clone(), e))?;

        info!("Backed up corrupted file to {backup_path:?}");
        Ok(Some(backup_path))
    }

    /// Load, backing up and discarding a corrupted document.
    pub fn load_or_discard<T: DeserializeOwned>(&self) -> PersistResult<Option<T>> {
        let loaded = self.load::<T>()?;

        if loaded.corruption_error.is_some()
            && let Err(e) = self.backup_corrupted()
        {
            warn!("{e} ({})", e.recovery_hint());
        }

        Ok(loaded.value)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".tmp.{}", std::process::id()));
        PathBuf::from(name)
    }
}
