//! Scroll position → visible rows heuristic.
//!
//! Assumes every row has the same height, derived from the scrollable
//! height and the number of loaded rows. Good enough to decide when to
//! prefetch; not an exact mapping.

use derive_getters::Getters;

/// Scroll state reported by the viewport, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Getters)]
pub struct ScrollMetrics {
    scroll_top: f64,
    scroll_height: f64,
    client_height: f64,
}

impl ScrollMetrics {
    /// Metrics of a viewport scrolled to `scroll_top`.
    pub fn new(scroll_top: f64, scroll_height: f64, client_height: f64) -> Self {
        Self {
            scroll_top,
            scroll_height,
            client_height,
        }
    }
}

/// Rows the viewport currently shows, by index into the flattened rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct VisibleWindow {
    /// First visible row index
    start: usize,
    /// Last visible row index
    end: usize,
    /// Page containing the middle visible row, 1-based
    page: u32,
}

impl VisibleWindow {
    /// Estimate the visible rows.
    ///
    /// Returns `None` when nothing is loaded or the metrics are degenerate.
    ///
    /// ```
    /// use weft_cache::{ScrollMetrics, VisibleWindow};
    ///
    /// let window = VisibleWindow::estimate(ScrollMetrics::new(800.0, 2000.0, 400.0), 100, 20)
    ///     .expect("rows are loaded");
    /// assert_eq!((*window.start(), *window.end(), *window.page()), (40, 60, 3));
    /// ```
    pub fn estimate(metrics: ScrollMetrics, row_count: usize, page_size: u32) -> Option<Self> {
        if row_count == 0 || page_size == 0 {
            return None;
        }

        let row_height = metrics.scroll_height / row_count as f64;
        if !row_height.is_finite() || row_height <= 0.0 {
            return None;
        }

        let top = metrics.scroll_top.max(0.0);
        let start = (top / row_height).floor() as usize;
        let end = ((top + metrics.client_height.max(0.0)) / row_height).floor() as usize;
        let middle = (start + end) / 2;
        let page = u32::try_from(middle / page_size as usize)
            .unwrap_or(u32::MAX - 1)
            .saturating_add(1);

        Some(Self { start, end, page })
    }

    /// Whether the last visible row is within `threshold` rows of the end.
    pub fn near_end(&self, row_count: usize, threshold: usize) -> bool {
        self.end >= row_count.saturating_sub(threshold)
    }

    /// Whether the first visible row is within `threshold` rows of the start.
    pub fn near_start(&self, threshold: usize) -> bool {
        self.start <= threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 100 rows of 20px, 400px viewport: 20 rows visible at a time.
    fn at(scroll_top: f64) -> VisibleWindow {
        VisibleWindow::estimate(ScrollMetrics::new(scroll_top, 2000.0, 400.0), 100, 20)
            .expect("rows are loaded")
    }

    #[test]
    fn bottom_of_data_is_near_end() {
        let window = at(1600.0);
        assert_eq!(*window.start(), 80);
        assert_eq!(*window.end(), 100);
        assert_eq!(*window.page(), 5);
        assert!(window.near_end(100, 5));
        assert!(!window.near_start(5));
    }

    #[test]
    fn midpoint_is_near_neither_edge() {
        let window = at(800.0);
        assert!(!window.near_end(100, 5));
        assert!(!window.near_start(5));
    }

    #[test]
    fn top_of_data_is_near_start() {
        let window = at(0.0);
        assert_eq!(*window.page(), 1);
        assert!(window.near_start(5));
    }

    #[test]
    fn end_threshold_boundary() {
        // end = floor((1500 + 400) / 20) = 95, exactly 5 rows from the end
        assert!(at(1500.0).near_end(100, 5));
        // end = 94
        assert!(!at(1480.0).near_end(100, 5));
    }

    #[test]
    fn no_rows_means_no_window() {
        assert!(VisibleWindow::estimate(ScrollMetrics::new(0.0, 2000.0, 400.0), 0, 20).is_none());
        assert!(VisibleWindow::estimate(ScrollMetrics::new(0.0, 0.0, 400.0), 10, 20).is_none());
    }
}
