//! Preference storage error types.

use std::path::Path;

/// Ways a preference store can fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum StorageErrorKind {
    /// Reading or writing a preference file failed.
    #[display("Failed to {action} {path}: {message}")]
    Io {
        /// What the store was doing (`read`, `write`, `remove`, ...)
        action: &'static str,
        /// File involved
        path: String,
        /// Underlying I/O message
        message: String,
    },
    /// A preference could not be encoded for the store.
    #[display("Cannot encode preference `{key}`: {message}")]
    Encode {
        /// Storage key of the preference
        key: String,
        /// Serializer message
        message: String,
    },
    /// The store has no usable location.
    #[display("Preference store unavailable: {_0}")]
    Unavailable(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use weft_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::Unavailable("no home".to_string()));
/// assert!(format!("{}", err).contains("no home"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    kind: StorageErrorKind,
    line: u32,
    file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// I/O failure while performing `action` on `path`.
    #[track_caller]
    pub fn io(action: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::new(StorageErrorKind::Io {
            action,
            path: path.display().to_string(),
            message: source.to_string(),
        })
    }

    /// Encoding failure for the preference stored under `key`.
    #[track_caller]
    pub fn encode(key: &str, source: impl std::fmt::Display) -> Self {
        Self::new(StorageErrorKind::Encode {
            key: key.to_string(),
            message: source.to_string(),
        })
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StorageErrorKind {
        &self.kind
    }
}
