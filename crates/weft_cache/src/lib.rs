//! Windowed page cache for searchable data tables.
//!
//! A [`DataTable`] keeps a sparse cache of result pages for one query and
//! loads neighbouring pages as the user scrolls. Changing the query resets
//! the cache; responses for a previous query are discarded on arrival.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use weft_cache::{DataTable, DataTableConfig, LoadMode, ScrollMetrics};
//!
//! let table = DataTable::new(Arc::new(backend), DataTableConfig::new("material"));
//! table.initialize().await;
//! table.on_scroll(ScrollMetrics::new(1600.0, 2000.0, 400.0)).await;
//! table.load_page(4, LoadMode::Forward).await;
//! ```

#![forbid(unsafe_code)]

mod config;
mod cursor;
mod loading;
mod metrics;
mod page_cache;
mod scroll;
mod selection;
mod table;

pub use config::{
    DEFAULT_ERROR_MESSAGE, DEFAULT_PAGE_SIZE, DEFAULT_PREFETCH_THRESHOLD, DataTableConfig,
    DataTableConfigBuilder, DataTableConfigBuilderError,
};
pub use cursor::WindowCursor;
pub use loading::LoadMode;
pub use metrics::TableMetrics;
pub use page_cache::{Page, PageCache};
pub use scroll::{ScrollMetrics, VisibleWindow};
pub use selection::Selection;
pub use table::{DataTable, ScrollOutcome};
