//! Search backend error types.

/// Kinds of failures while loading a page from the search backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SearchErrorKind {
    /// The request never produced a response (connection refused, timeout, ...).
    #[display("Transport failure: {_0}")]
    Transport(String),
    /// The backend answered with a non-success status.
    #[display("Backend returned {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Body or reason returned by the backend
        message: String,
    },
    /// The response body could not be decoded.
    #[display("Failed to decode response: {_0}")]
    Decode(String),
    /// The response belongs to a generation that has since been reset.
    #[display("Response for page {page} superseded (generation {generation})")]
    Superseded {
        /// Page the response was fetched for
        page: u32,
        /// Generation the request was issued under
        generation: u64,
    },
    /// Page numbers are 1-based.
    #[display("Invalid page number: {_0}")]
    InvalidPage(u32),
}

/// Search error with location tracking.
///
/// # Examples
///
/// ```
/// use weft_error::{SearchError, SearchErrorKind};
///
/// let err = SearchError::new(SearchErrorKind::Transport("connection refused".into()));
/// assert!(format!("{}", err).contains("connection refused"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Search Error: {} at line {} in {}", kind, line, file)]
pub struct SearchError {
    kind: SearchErrorKind,
    line: u32,
    file: &'static str,
}

impl SearchError {
    /// Create a new search error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SearchErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &SearchErrorKind {
        &self.kind
    }

    /// Reason without location decoration; empty when the backend gave none.
    pub fn reason(&self) -> String {
        match &self.kind {
            SearchErrorKind::Transport(message) | SearchErrorKind::Decode(message) => {
                message.clone()
            }
            SearchErrorKind::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// True when the response was dropped because the cache was reset meanwhile.
    pub fn is_superseded(&self) -> bool {
        matches!(self.kind, SearchErrorKind::Superseded { .. })
    }
}
