//! Umbrella error type for the Weft workspace.

use crate::{ConfigError, SearchError, StorageError};

/// Every error a Weft crate can surface.
#[derive(Debug, Clone, derive_more::Display, derive_more::From)]
pub enum WeftErrorKind {
    /// Search backend failure
    #[display("{_0}")]
    Search(SearchError),
    /// Configuration failure
    #[display("{_0}")]
    Config(ConfigError),
    /// Preference storage failure
    #[display("{_0}")]
    Storage(StorageError),
}

/// Weft error with location tracking.
///
/// # Examples
///
/// ```
/// use weft_error::{ConfigError, WeftError, WeftErrorKind};
///
/// let err: WeftError = ConfigError::new("missing base_url").into();
/// assert!(matches!(err.kind(), WeftErrorKind::Config(_)));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Weft Error: {} at line {} in {}", kind, line, file)]
pub struct WeftError {
    kind: WeftErrorKind,
    line: u32,
    file: &'static str,
}

impl WeftError {
    /// Create a new error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: WeftErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &WeftErrorKind {
        &self.kind
    }

    /// Message suitable for an end-user notification.
    ///
    /// Strips the location decoration and returns only the innermost reason.
    pub fn user_message(&self) -> String {
        match &self.kind {
            WeftErrorKind::Search(e) => e.reason(),
            WeftErrorKind::Config(e) => e.message.clone(),
            WeftErrorKind::Storage(e) => e.kind().to_string(),
        }
    }
}

impl<T> From<T> for WeftError
where
    T: Into<WeftErrorKind>,
{
    #[track_caller]
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result alias used across the workspace.
pub type WeftResult<T> = Result<T, WeftError>;
