//! Core data types for the Weft data-table cache.
//!
//! This crate provides the wire types of the backend search contract, the
//! query state that selects a result set, and the table page configuration
//! shared by every other Weft crate.

#![forbid(unsafe_code)]

mod observability;
mod query;
mod request;
mod row;
mod sort;
mod table;

pub use observability::{
    LogFormat, MetricsExporter, init_observability, init_tracing, shutdown_observability,
};
pub use query::{FILTERS_PARAM, QUERY_PARAM, QueryState, SORT_PARAM};
pub use request::{Pagination, SearchRequest, SearchRequestBuilder, SearchResponse};
pub use row::{ROW_ID_ALIAS, ROW_ID_FIELD, Row};
pub use sort::{SortOrder, SortSpec};
pub use table::{
    ColumnConfig, ColumnPreference, FilterConfig, FilterKind, FilterOption, PageConfig,
    TablePreference,
};
