//! Preference store backed by one JSON file per key.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use weft_error::{StorageError, StorageErrorKind};
use weft_interface::PreferenceStore;

/// Stores each key as `{dir}/{key}.json`.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    dir: PathBuf,
}

impl FilePreferenceStore {
    /// Store rooted at `dir`; the directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store under the user's configuration directory
    /// (`~/.config/weft/preferences` on Linux).
    ///
    /// # Errors
    ///
    /// Returns an error if the platform has no configuration directory.
    pub fn in_config_dir() -> Result<Self, StorageError> {
        let base = dirs::config_dir().ok_or_else(|| {
            StorageError::new(StorageErrorKind::Unavailable(
                "no configuration directory on this platform".to_string(),
            ))
        })?;
        Ok(Self::new(base.join("weft").join("preferences")))
    }

    /// Directory holding the files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

impl PreferenceStore for FilePreferenceStore {
    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io("read", &path, e)),
        }
    }

    #[instrument(skip(self, value))]
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| StorageError::io("create", &self.dir, e))?;
        let path = self.path_for(key);
        std::fs::write(&path, value).map_err(|e| StorageError::io("write", &path, e))?;
        debug!(path = %path.display(), "Stored preference");
        Ok(())
    }

    #[instrument(skip(self))]
    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io("remove", &path, e)),
        }
    }
}
