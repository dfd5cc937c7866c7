//! Data table configuration.

use derive_getters::Getters;
use serde_json::{Map, Value};
use weft_core::PageConfig;

/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Default distance, in rows, from either edge of the loaded data at which
/// scrolling triggers a prefetch.
pub const DEFAULT_PREFETCH_THRESHOLD: usize = 5;

/// Message shown when a failure carries no message of its own.
pub const DEFAULT_ERROR_MESSAGE: &str = "Failed to load data";

/// Configuration of one [`DataTable`](crate::DataTable).
///
/// # Examples
///
/// ```
/// use weft_cache::DataTableConfigBuilder;
///
/// let config = DataTableConfigBuilder::default()
///     .index("material")
///     .page_size(50u32)
///     .build()
///     .expect("valid config");
/// assert_eq!(*config.prefetch_threshold(), 5);
///
/// assert!(DataTableConfigBuilder::default().index("order").page_size(0u32).build().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Getters, derive_builder::Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct DataTableConfig {
    /// Backend index searched by the table
    index: String,
    /// Rows per page; fixed for the table's lifetime
    #[builder(default = "DEFAULT_PAGE_SIZE")]
    page_size: u32,
    #[builder(default = "DEFAULT_PREFETCH_THRESHOLD")]
    prefetch_threshold: usize,
    #[builder(default = "DEFAULT_ERROR_MESSAGE.to_string()")]
    generic_error_message: String,
    /// Aggregations requested with every page
    #[builder(default)]
    agg_requests: Option<Map<String, Value>>,
}

impl DataTableConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.page_size {
            Some(0) => Err("page_size must be greater than zero".to_string()),
            _ => Ok(()),
        }
    }
}

impl DataTableConfig {
    /// Defaults for searching `index`.
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            page_size: DEFAULT_PAGE_SIZE,
            prefetch_threshold: DEFAULT_PREFETCH_THRESHOLD,
            generic_error_message: DEFAULT_ERROR_MESSAGE.to_string(),
            agg_requests: None,
        }
    }

    /// Configuration for a table page. A zero page size falls back to the default.
    pub fn from_page_config(page: &PageConfig) -> Self {
        let page_size = match *page.page_size() {
            0 => DEFAULT_PAGE_SIZE,
            n => n,
        };
        Self {
            page_size,
            ..Self::new(page.index().clone())
        }
    }
}
