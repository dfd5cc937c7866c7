//! Selected rows.

use std::collections::BTreeMap;
use weft_core::Row;

/// Rows the user has selected, keyed by row identifier.
///
/// Independent of the page cache except that a cache reset clears it.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    rows: BTreeMap<String, Row>,
}

impl Selection {
    /// Nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `row`. Rows without an identifier cannot be selected.
    pub fn select(&mut self, row: Row) -> bool {
        match row.id() {
            Some(id) => {
                self.rows.insert(id, row);
                true
            }
            None => false,
        }
    }

    /// Deselect the row with `id`; returns whether it was selected.
    pub fn deselect(&mut self, id: &str) -> bool {
        self.rows.remove(id).is_some()
    }

    /// Flip the selection state of `row`; returns whether it is now selected.
    pub fn toggle(&mut self, row: Row) -> bool {
        match row.id() {
            Some(id) if self.rows.contains_key(&id) => {
                self.rows.remove(&id);
                false
            }
            Some(_) => self.select(row),
            None => false,
        }
    }

    /// Whether the row with `id` is selected.
    pub fn contains(&self, id: &str) -> bool {
        self.rows.contains_key(id)
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Number of selected rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Selected rows ordered by identifier.
    pub fn rows(&self) -> Vec<Row> {
        self.rows.values().cloned().collect()
    }
}
