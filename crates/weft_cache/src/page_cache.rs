//! Sparse page-number → rows cache.

use std::collections::BTreeMap;
use std::sync::Arc;
use weft_core::Row;

/// Rows of one fetched page. Immutable once cached, cheap to clone.
pub type Page = Arc<[Row]>;

/// Cache of fetched pages keyed by 1-based page number.
///
/// Pages need not be contiguous. Iteration, [`flatten`](Self::flatten) and the
/// window bounds always follow ascending page number, whatever order the
/// pages were inserted in.
#[derive(Debug, Clone, Default)]
pub struct PageCache {
    pages: BTreeMap<u32, Page>,
}

impl PageCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows of `page`, if cached. Never performs I/O.
    pub fn get(&self, page: u32) -> Option<Page> {
        self.pages.get(&page).cloned()
    }

    /// Whether `page` is cached.
    pub fn contains(&self, page: u32) -> bool {
        self.pages.contains_key(&page)
    }

    /// Insert or overwrite `page`. An empty page is valid.
    pub fn set(&mut self, page: u32, rows: impl Into<Page>) {
        self.pages.insert(page, rows.into());
    }

    /// Remove every page.
    pub fn clear(&mut self) {
        self.pages.clear();
    }

    /// All cached rows, concatenated in ascending page order.
    pub fn flatten(&self) -> Vec<Row> {
        self.pages
            .values()
            .flat_map(|rows| rows.iter().cloned())
            .collect()
    }

    /// Number of cached pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether no page is cached.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total rows across all cached pages.
    pub fn row_count(&self) -> usize {
        self.pages.values().map(|rows| rows.len()).sum()
    }

    /// Cached page numbers in ascending order.
    pub fn page_numbers(&self) -> Vec<u32> {
        self.pages.keys().copied().collect()
    }

    /// Lowest cached page number.
    pub fn first_page(&self) -> Option<u32> {
        self.pages.keys().next().copied()
    }

    /// Highest cached page number.
    pub fn last_page(&self) -> Option<u32> {
        self.pages.keys().next_back().copied()
    }

    /// True iff the highest cached page is full, suggesting more data exists.
    pub fn has_more(&self, page_size: u32) -> bool {
        self.pages
            .values()
            .next_back()
            .is_some_and(|rows| rows.len() == page_size as usize)
    }

    /// True iff the lowest cached page comes after page 1.
    pub fn has_previous(&self) -> bool {
        self.first_page().is_some_and(|page| page > 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(page: u32, count: usize) -> Vec<Row> {
        (0..count)
            .map(|i| Row::from_item(json!({ "_id": format!("{page}-{i}") })))
            .collect()
    }

    #[test]
    fn empty_cache_has_no_window() {
        let cache = PageCache::new();
        assert!(cache.flatten().is_empty());
        assert!(!cache.has_more(20));
        assert!(!cache.has_previous());
        assert_eq!(cache.first_page(), None);
    }

    #[test]
    fn empty_page_is_cached() {
        let mut cache = PageCache::new();
        cache.set(4, Vec::<Row>::new());
        assert!(cache.contains(4));
        assert_eq!(cache.get(4).map(|p| p.len()), Some(0));
    }

    #[test]
    fn has_previous_tracks_lowest_page() {
        let mut cache = PageCache::new();
        cache.set(3, rows(3, 2));
        assert!(cache.has_previous());
        cache.set(1, rows(1, 2));
        assert!(!cache.has_previous());
    }

    #[test]
    fn row_count_sums_pages() {
        let mut cache = PageCache::new();
        cache.set(1, rows(1, 20));
        cache.set(2, rows(2, 7));
        assert_eq!(cache.row_count(), 27);
        assert_eq!(cache.page_numbers(), vec![1, 2]);
    }
}
