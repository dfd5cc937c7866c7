//! Configuration error type.

use std::fmt::Display;

/// Invalid or unreadable configuration, with the location that detected it.
///
/// # Examples
///
/// ```
/// use weft_error::ConfigError;
///
/// let err = ConfigError::invalid_setting("page_size", "must be greater than zero");
/// assert!(err.message.contains("page_size"));
/// assert!(format!("{}", err).starts_with("Configuration Error"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// What is wrong, naming the offending setting where known
    pub message: String,
    /// Line where the error was detected
    pub line: u32,
    /// File where the error was detected
    pub file: &'static str,
}

impl ConfigError {
    /// Error with a free-form message at the caller's location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// Error for one named setting.
    #[track_caller]
    pub fn invalid_setting(key: &str, reason: impl Display) -> Self {
        Self::new(format!("invalid `{}`: {}", key, reason))
    }
}
