//! Request and response types for the backend search endpoint.

use crate::{QueryState, SortSpec};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Offset/size window of a search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct Pagination {
    offset: u64,
    size: u32,
}

impl Pagination {
    /// Window starting at `offset` with `size` rows.
    pub fn new(offset: u64, size: u32) -> Self {
        Self { offset, size }
    }

    /// Window covering the 1-based `page` of `page_size` rows.
    ///
    /// ```
    /// use weft_core::Pagination;
    ///
    /// let p = Pagination::for_page(3, 20);
    /// assert_eq!(*p.offset(), 40);
    /// assert_eq!(*p.size(), 20);
    /// ```
    pub fn for_page(page: u32, page_size: u32) -> Self {
        let offset = u64::from(page.saturating_sub(1)) * u64::from(page_size);
        Self::new(offset, page_size)
    }
}

/// Body of `POST /search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct SearchRequest {
    /// Entity index to search (material, order, supplier, ...)
    index: String,
    /// Free-text query
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    query: Option<String>,
    /// Exact-match filters
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    filters: Option<BTreeMap<String, Value>>,
    /// Sort keys in priority order
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    sort: Option<Vec<SortSpec>>,
    /// Aggregations to compute alongside the hits
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    agg_requests: Option<Map<String, Value>>,
    /// Result window
    pagination: Pagination,
}

impl SearchRequest {
    /// Builder for a search request.
    pub fn builder() -> SearchRequestBuilder {
        SearchRequestBuilder::default()
    }

    /// Request for one page of results under the given query state.
    ///
    /// Empty query text, filters and sort are omitted from the body.
    pub fn for_page(index: impl Into<String>, state: &QueryState, page: u32, page_size: u32) -> Self {
        Self {
            index: index.into(),
            query: Some(state.query().clone()).filter(|q| !q.is_empty()),
            filters: Some(state.filters().clone()).filter(|f| !f.is_empty()),
            sort: Some(state.sort().clone()).filter(|s| !s.is_empty()),
            agg_requests: None,
            pagination: Pagination::for_page(page, page_size),
        }
    }

    /// Attach aggregation requests.
    pub fn with_agg_requests(self, agg_requests: Option<Map<String, Value>>) -> Self {
        Self {
            agg_requests,
            ..self
        }
    }
}

/// Body returned by `POST /search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
pub struct SearchResponse {
    /// Matching documents for the requested window
    #[serde(default)]
    items: Vec<Value>,
    /// Total number of matches across all windows
    #[serde(default)]
    total: u64,
    /// Backend processing time in milliseconds
    #[serde(default)]
    took: u64,
    /// Aggregation results, if any were requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    aggregations: Option<Map<String, Value>>,
}

impl SearchResponse {
    /// Response carrying `items` out of `total` matches.
    pub fn new(items: Vec<Value>, total: u64) -> Self {
        Self {
            items,
            total,
            took: 0,
            aggregations: None,
        }
    }

    /// Attach aggregation results.
    pub fn with_aggregations(self, aggregations: Map<String, Value>) -> Self {
        Self {
            aggregations: Some(aggregations),
            ..self
        }
    }

    /// Split into items and metadata.
    pub fn into_parts(self) -> (Vec<Value>, u64, u64, Option<Map<String, Value>>) {
        (self.items, self.total, self.took, self.aggregations)
    }
}
