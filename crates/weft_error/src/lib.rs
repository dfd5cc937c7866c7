//! Error types for the Weft data-table cache.
//!
//! Every error records the source line and file where it was created, so a
//! failure surfaced to a user can be traced back without a backtrace.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod search;
mod storage;

pub use config::ConfigError;
pub use error::{WeftError, WeftErrorKind, WeftResult};
pub use search::{SearchError, SearchErrorKind};
pub use storage::{StorageError, StorageErrorKind};
