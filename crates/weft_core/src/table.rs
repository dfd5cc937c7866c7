//! Table page configuration and stored column preferences.

use crate::SortSpec;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Display configuration of one table column.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[serde(rename_all = "camelCase")]
#[setters(prefix = "with_")]
pub struct ColumnConfig {
    /// Row field rendered in this column
    #[setters(skip)]
    key: String,
    /// Header label
    #[setters(skip)]
    label: String,
    /// Width in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    width: Option<u32>,
    #[serde(default)]
    sortable: bool,
    #[serde(default)]
    filterable: bool,
    /// Hidden columns stay configurable but are not rendered
    #[serde(default = "default_visible")]
    visible: bool,
    /// Position among the columns, lower first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    order: Option<i32>,
}

fn default_visible() -> bool {
    true
}

impl ColumnConfig {
    /// Visible, unsized column showing `key` under `label`.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            width: None,
            sortable: false,
            filterable: false,
            visible: true,
            order: None,
        }
    }
}

/// Input widget used by a filter.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FilterKind {
    Text,
    Select,
    Date,
    DateRange,
    Number,
}

/// One selectable value of a filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct FilterOption {
    label: String,
    value: Value,
}

impl FilterOption {
    /// Option shown as `label` that filters on `value`.
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Options from a terms aggregation (`{ "buckets": [{ "key": .. }] }`).
    ///
    /// Anything that is not a bucket list yields no options.
    ///
    /// ```
    /// use serde_json::json;
    /// use weft_core::FilterOption;
    ///
    /// let agg = json!({ "buckets": [{ "key": "open", "doc_count": 3 }] });
    /// let options = FilterOption::from_aggregation(&agg);
    /// assert_eq!(options[0].label(), "open");
    /// ```
    pub fn from_aggregation(aggregation: &Value) -> Vec<Self> {
        aggregation
            .get("buckets")
            .and_then(Value::as_array)
            .map(|buckets| {
                buckets
                    .iter()
                    .filter_map(|bucket| bucket.get("key"))
                    .map(|key| {
                        let label = match key {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        };
                        Self::new(label, key.clone())
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Filter control offered by a table page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct FilterConfig {
    key: String,
    label: String,
    #[serde(rename = "type")]
    kind: FilterKind,
    /// Static options; dynamic ones come from aggregations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    options: Vec<FilterOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    placeholder: Option<String>,
}

impl FilterConfig {
    /// Filter on `key` using the given widget.
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: FilterKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            options: Vec::new(),
            placeholder: None,
        }
    }

    /// Replace the static options.
    pub fn with_options(self, options: Vec<FilterOption>) -> Self {
        Self { options, ..self }
    }
}

/// Everything a back-office table page needs: index, columns, filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    /// Preference storage namespace
    page_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    /// Backend index searched by the page
    index: String,
    columns: Vec<ColumnConfig>,
    #[serde(default)]
    filters: Vec<FilterConfig>,
    /// Fetch every filter's options up front instead of on demand
    #[serde(default)]
    eager_load_filters: bool,
    page_size: u32,
}

impl PageConfig {
    /// Page of `page_type` searching `index` with the given columns.
    pub fn new(
        page_type: impl Into<String>,
        index: impl Into<String>,
        columns: Vec<ColumnConfig>,
        page_size: u32,
    ) -> Self {
        Self {
            page_type: page_type.into(),
            title: None,
            index: index.into(),
            columns,
            filters: Vec::new(),
            eager_load_filters: false,
            page_size,
        }
    }

    /// Replace the filters.
    pub fn with_filters(self, filters: Vec<FilterConfig>) -> Self {
        Self { filters, ..self }
    }
}

/// Stored state of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPreference {
    /// Whether the column is rendered
    pub visible: bool,
    /// Position among the columns
    pub order: i32,
    /// User-chosen width, if resized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

/// Stored preferences of one table page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePreference {
    /// Column preferences keyed by column key
    #[serde(default)]
    pub columns: BTreeMap<String, ColumnPreference>,
    /// Sort applied when the page opens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_sort: Option<SortSpec>,
}
