//! Per-page column preferences.

use std::sync::Arc;
use tracing::{debug, instrument, warn};
use weft_core::{ColumnConfig, ColumnPreference, SortSpec, TablePreference};
use weft_error::StorageError;
use weft_interface::PreferenceStore;

/// Key the preferences of `page_type` are stored under.
///
/// ```
/// assert_eq!(weft_storage::storage_key("material"), "table-preference-material");
/// ```
pub fn storage_key(page_type: &str) -> String {
    format!("table-preference-{}", page_type)
}

/// Column preferences of one table page, layered over its default columns.
pub struct TablePreferences {
    page_type: String,
    key: String,
    defaults: Vec<ColumnConfig>,
    store: Arc<dyn PreferenceStore>,
}

impl std::fmt::Debug for TablePreferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TablePreferences")
            .field("page_type", &self.page_type)
            .field("defaults", &self.defaults.len())
            .finish_non_exhaustive()
    }
}

impl TablePreferences {
    /// Preferences of `page_type`, whose columns default to `defaults`.
    pub fn new(
        page_type: impl Into<String>,
        defaults: Vec<ColumnConfig>,
        store: Arc<dyn PreferenceStore>,
    ) -> Self {
        let page_type = page_type.into();
        Self {
            key: storage_key(&page_type),
            page_type,
            defaults,
            store,
        }
    }

    /// Page type the preferences belong to.
    pub fn page_type(&self) -> &str {
        &self.page_type
    }

    /// Default columns, as configured.
    pub fn defaults(&self) -> &[ColumnConfig] {
        &self.defaults
    }

    /// Stored preferences, if any.
    ///
    /// Unreadable or corrupt entries are logged and treated as absent.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn load(&self) -> Option<TablePreference> {
        let stored = match self.store.get(&self.key) {
            Ok(stored) => stored?,
            Err(e) => {
                warn!(error = %e, "Failed to read table preference");
                return None;
            }
        };
        match serde_json::from_str(&stored) {
            Ok(preference) => Some(preference),
            Err(e) => {
                warn!(error = %e, "Ignoring corrupt table preference");
                None
            }
        }
    }

    fn save(&self, preference: &TablePreference) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(preference)
            .map_err(|e| StorageError::encode(&self.key, e))?;
        self.store.set(&self.key, &encoded)?;
        debug!(key = %self.key, columns = preference.columns.len(), "Saved table preference");
        Ok(())
    }

    /// Apply the stored preferences to `columns`.
    ///
    /// Columns with a stored preference take its visibility, order and width
    /// (keeping their own width when none was stored); the result is sorted by
    /// order, columns without one counting as 0. Without stored preferences
    /// `columns` is returned as is.
    pub fn merge_columns(&self, columns: &[ColumnConfig]) -> Vec<ColumnConfig> {
        let Some(preference) = self.load() else {
            return columns.to_vec();
        };

        let mut merged: Vec<ColumnConfig> = columns
            .iter()
            .map(|column| match preference.columns.get(column.key()) {
                Some(pref) => {
                    let width = pref.width.filter(|w| *w > 0).or(*column.width());
                    column
                        .clone()
                        .with_visible(pref.visible)
                        .with_order(Some(pref.order))
                        .with_width(width)
                }
                None => column.clone(),
            })
            .collect();
        merged.sort_by_key(|column| column.order().unwrap_or(0));
        merged
    }

    /// Default columns with the stored preferences applied.
    pub fn columns(&self) -> Vec<ColumnConfig> {
        self.merge_columns(&self.defaults)
    }

    /// Store `columns` as the user's arrangement: their position becomes their
    /// order. A stored default sort is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    #[instrument(skip(self, columns), fields(key = %self.key, count = columns.len()))]
    pub fn update_columns(&self, columns: &[ColumnConfig]) -> Result<TablePreference, StorageError> {
        let default_sort = self.load().and_then(|p| p.default_sort);
        let preference = TablePreference {
            columns: columns
                .iter()
                .enumerate()
                .map(|(index, column)| {
                    let pref = ColumnPreference {
                        visible: *column.visible(),
                        order: i32::try_from(index).unwrap_or(i32::MAX),
                        width: *column.width(),
                    };
                    (column.key().clone(), pref)
                })
                .collect(),
            default_sort,
        };
        self.save(&preference)?;
        Ok(preference)
    }

    /// Sort applied when the page opens, if the user chose one.
    pub fn default_sort(&self) -> Option<SortSpec> {
        self.load().and_then(|p| p.default_sort)
    }

    /// Remember `sort` as the page's opening sort; `None` clears it.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    pub fn set_default_sort(&self, sort: Option<SortSpec>) -> Result<(), StorageError> {
        let mut preference = self.load().unwrap_or_default();
        preference.default_sort = sort;
        self.save(&preference)
    }

    /// Forget every stored preference and return the default columns.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot remove the entry.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn reset_to_default(&self) -> Result<Vec<ColumnConfig>, StorageError> {
        self.store.remove(&self.key)?;
        debug!("Reset table preference");
        Ok(self.defaults.clone())
    }
}
