//! Query state and its URL query-parameter encoding.

use crate::SortSpec;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// URL parameter holding the free-text query.
pub const QUERY_PARAM: &str = "q";
/// URL parameter holding the JSON-encoded filter map.
pub const FILTERS_PARAM: &str = "filters";
/// URL parameter holding the JSON-encoded sort list.
pub const SORT_PARAM: &str = "sort";

/// Query text, filters and sort that together select a result set.
///
/// Filters are kept in a `BTreeMap` so two states with the same entries
/// compare equal regardless of insertion order.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[setters(prefix = "with_", into)]
pub struct QueryState {
    /// Free-text query; empty means no text filter
    #[serde(default)]
    query: String,
    /// Field filters
    #[serde(default)]
    filters: BTreeMap<String, Value>,
    /// Sort keys in priority order
    #[serde(default)]
    sort: Vec<SortSpec>,
}

impl QueryState {
    /// State with no query text, filters or sort.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nothing narrows or orders the result set.
    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.filters.is_empty() && self.sort.is_empty()
    }

    /// Add or replace one filter.
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Encode as URL query parameters.
    ///
    /// Empty fields are omitted, so an empty state produces no parameters.
    ///
    /// ```
    /// use weft_core::{QueryState, SortSpec};
    ///
    /// let state = QueryState::new()
    ///     .with_query("red")
    ///     .with_sort(vec![SortSpec::desc("created_at")]);
    /// let params = state.to_url_params();
    /// assert_eq!(params.get("q").map(String::as_str), Some("red"));
    /// assert!(params.get("filters").is_none());
    /// ```
    pub fn to_url_params(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        if !self.query.is_empty() {
            params.insert(QUERY_PARAM.to_string(), self.query.clone());
        }
        if !self.filters.is_empty() {
            if let Ok(encoded) = serde_json::to_string(&self.filters) {
                params.insert(FILTERS_PARAM.to_string(), encoded);
            }
        }
        if !self.sort.is_empty() {
            if let Ok(encoded) = serde_json::to_string(&self.sort) {
                params.insert(SORT_PARAM.to_string(), encoded);
            }
        }
        params
    }

    /// Decode from URL query parameters.
    ///
    /// Missing parameters and malformed JSON both yield the empty value for
    /// that field; decoding never fails.
    pub fn from_url_params(params: &BTreeMap<String, String>) -> Self {
        let query = params.get(QUERY_PARAM).cloned().unwrap_or_default();
        let filters = params
            .get(FILTERS_PARAM)
            .and_then(|raw| decode_param(FILTERS_PARAM, raw))
            .unwrap_or_default();
        let sort = params
            .get(SORT_PARAM)
            .and_then(|raw| decode_param(SORT_PARAM, raw))
            .unwrap_or_default();

        Self {
            query,
            filters,
            sort,
        }
    }
}

fn decode_param<T: serde::de::DeserializeOwned>(name: &str, raw: &str) -> Option<T> {
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(param = name, error = %e, "Ignoring malformed URL parameter");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SortOrder;
    use serde_json::json;

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn url_params_survive_encoding() {
        let state = QueryState::new()
            .with_query("cotton")
            .with_filter("status", "active")
            .with_sort(vec![SortSpec::desc("price")]);

        let decoded = QueryState::from_url_params(&state.to_url_params());
        assert_eq!(decoded, state);
    }

    #[test]
    fn malformed_filters_fall_back_to_empty() {
        let decoded = QueryState::from_url_params(&params(&[
            ("q", "wool"),
            ("filters", "{not json"),
            ("sort", r#"[{"field":"name","order":"desc"}]"#),
        ]));

        assert_eq!(decoded.query(), "wool");
        assert!(decoded.filters().is_empty());
        assert_eq!(decoded.sort()[0].order(), &SortOrder::Desc);
    }

    #[test]
    fn malformed_sort_falls_back_to_empty() {
        let decoded = QueryState::from_url_params(&params(&[
            ("filters", r#"{"supplier":"acme"}"#),
            ("sort", r#"[{"field":"name","order":"sideways"}]"#),
        ]));

        assert_eq!(decoded.filters().get("supplier"), Some(&json!("acme")));
        assert!(decoded.sort().is_empty());
    }

    #[test]
    fn filter_order_does_not_affect_equality() {
        let a = QueryState::new().with_filter("a", 1).with_filter("b", 2);
        let b = QueryState::new().with_filter("b", 2).with_filter("a", 1);
        assert_eq!(a, b);
    }
}
