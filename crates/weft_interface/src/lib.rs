//! Trait definitions for the Weft data-table cache.
//!
//! The cache talks to the outside world only through these seams:
//! - [`SearchBackend`] - the backend search endpoint
//! - [`Notifier`] - user-visible error reporting
//! - [`Navigator`] - the URL query string of the hosting page
//! - [`PreferenceStore`] - key-value storage for table preferences

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod backend;
mod navigator;
mod notifier;
mod preference_store;

pub use backend::SearchBackend;
pub use navigator::{Navigator, NoopNavigator};
pub use notifier::{Notifier, TracingNotifier};
pub use preference_store::PreferenceStore;
