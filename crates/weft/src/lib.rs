//! Incrementally loaded, searchable data tables over a remote search service.
//!
//! This crate re-exports the Weft workspace:
//!
//! - [`DataTable`] keeps a sparse cache of result pages for one query and
//!   loads neighbouring pages as the user scrolls
//! - [`HttpSearchBackend`] talks to the search service over HTTP
//! - [`TablePreferences`] persists column arrangements per table page
//!
//! # Example
//!
//! ```rust,ignore
//! use weft::{ClientConfig, DataTableConfig, open_table};
//!
//! let client = ClientConfig::load(None)?;
//! let table = open_table(&client, DataTableConfig::new("material"))?;
//! table.set_query("cotton").await;
//! for row in table.rows() {
//!     println!("{:?}", row.id());
//! }
//! ```

#![forbid(unsafe_code)]

use std::sync::Arc;

pub use weft_cache::{
    DEFAULT_ERROR_MESSAGE, DEFAULT_PAGE_SIZE, DEFAULT_PREFETCH_THRESHOLD, DataTable,
    DataTableConfig, DataTableConfigBuilder, LoadMode, Page, PageCache, ScrollMetrics,
    ScrollOutcome, Selection, VisibleWindow, WindowCursor,
};
pub use weft_client::{ClientConfig, ClientConfigBuilder, HttpSearchBackend};
pub use weft_core::{
    ColumnConfig, ColumnPreference, FilterConfig, FilterKind, FilterOption, LogFormat,
    PageConfig, Pagination, QueryState, Row, SearchRequest, SearchResponse, SortOrder, SortSpec,
    TablePreference, init_observability, init_tracing, shutdown_observability,
};
pub use weft_error::{
    ConfigError, SearchError, SearchErrorKind, StorageError, StorageErrorKind, WeftError,
    WeftErrorKind, WeftResult,
};
pub use weft_interface::{
    Navigator, NoopNavigator, Notifier, PreferenceStore, SearchBackend, TracingNotifier,
};
pub use weft_storage::{
    FilePreferenceStore, MemoryPreferenceStore, TablePreferences, storage_key,
};

/// Table over the HTTP search service described by `client`.
///
/// Load failures are reported through tracing; attach another [`Notifier`]
/// with [`DataTable::with_notifier`].
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed.
pub fn open_table(client: &ClientConfig, config: DataTableConfig) -> WeftResult<DataTable> {
    let backend = HttpSearchBackend::new(client)?;
    Ok(DataTable::new(Arc::new(backend), config))
}

/// Table for a configured page, with the page's stored default sort applied
/// to its initial query.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed.
pub async fn open_page(
    client: &ClientConfig,
    page: &PageConfig,
    preferences: &TablePreferences,
) -> WeftResult<DataTable> {
    let table = open_table(client, DataTableConfig::from_page_config(page))?;
    match preferences.default_sort() {
        Some(sort) => {
            table.set_sort(vec![sort]).await;
        }
        None => {
            table.reload().await;
        }
    }
    Ok(table)
}
