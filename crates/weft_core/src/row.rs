//! Result rows and identifier normalization.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Canonical identifier field every cached row carries.
pub const ROW_ID_FIELD: &str = "_id";

/// Identifier field some indices return instead of the canonical one.
pub const ROW_ID_ALIAS: &str = "id";

/// Field used to wrap items that are not JSON objects.
const SCALAR_FIELD: &str = "value";

/// One search hit as a JSON object.
///
/// Rows built with [`Row::from_item`] always carry `_id` when the backend
/// supplied either `_id` or `id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Map<String, Value>);

impl Row {
    /// Wrap a JSON object without normalization.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Build a row from a backend item, normalizing its identifier.
    ///
    /// The canonical `_id` wins when present; otherwise `id` is copied into
    /// `_id`. Non-object items are wrapped under a `value` field.
    ///
    /// ```
    /// use serde_json::json;
    /// use weft_core::Row;
    ///
    /// let row = Row::from_item(json!({ "id": 7, "name": "twill" }));
    /// assert_eq!(row.id().as_deref(), Some("7"));
    /// ```
    pub fn from_item(item: Value) -> Self {
        let mut fields = match item {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert(SCALAR_FIELD.to_string(), other);
                map
            }
        };

        let has_canonical = fields
            .get(ROW_ID_FIELD)
            .is_some_and(|v| !v.is_null());
        if !has_canonical {
            if let Some(alias) = fields.get(ROW_ID_ALIAS).filter(|v| !v.is_null()).cloned() {
                fields.insert(ROW_ID_FIELD.to_string(), alias);
            }
        }

        Self(fields)
    }

    /// Identifier of the row as a string, if it has one.
    pub fn id(&self) -> Option<String> {
        match self.0.get(ROW_ID_FIELD)? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// Field value by name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// All fields of the row.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume the row, returning its fields.
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Value> for Row {
    fn from(item: Value) -> Self {
        Self::from_item(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_id_wins_over_alias() {
        let row = Row::from_item(json!({ "_id": "abc", "id": "xyz" }));
        assert_eq!(row.id().as_deref(), Some("abc"));
    }

    #[test]
    fn alias_fills_missing_canonical_id() {
        let row = Row::from_item(json!({ "id": "xyz", "name": "denim" }));
        assert_eq!(row.id().as_deref(), Some("xyz"));
        assert_eq!(row.get("id"), Some(&json!("xyz")));
    }

    #[test]
    fn null_canonical_id_falls_back_to_alias() {
        let row = Row::from_item(json!({ "_id": null, "id": 12 }));
        assert_eq!(row.id().as_deref(), Some("12"));
    }

    #[test]
    fn missing_identifier_is_tolerated() {
        let row = Row::from_item(json!({ "name": "linen" }));
        assert_eq!(row.id(), None);
        assert_eq!(row.get("name"), Some(&json!("linen")));
    }

    #[test]
    fn scalar_items_are_wrapped() {
        let row = Row::from_item(json!(42));
        assert_eq!(row.get("value"), Some(&json!(42)));
    }
}
