//! Position and totals of the loaded window.

use derive_getters::Getters;

/// Where the user is in the result set and what the backend last reported.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct WindowCursor {
    /// Page the viewport is centred on, 1-based
    current_page: u32,
    /// Total matches reported by the latest response
    total_count: u64,
    /// Backend time of the latest response, in milliseconds
    took: u64,
    /// Rows per page, fixed at construction
    page_size: u32,
}

impl WindowCursor {
    /// Cursor on page 1 with nothing loaded.
    pub fn new(page_size: u32) -> Self {
        Self {
            current_page: 1,
            total_count: 0,
            took: 0,
            page_size,
        }
    }

    /// Move to `page`; page 0 is ignored.
    pub fn move_to(&mut self, page: u32) {
        if page > 0 {
            self.current_page = page;
        }
    }

    /// Back to page 1. Totals are kept until the next response replaces them.
    pub fn rewind(&mut self) {
        self.current_page = 1;
    }

    /// Record response metadata.
    pub fn record_response(&mut self, total_count: u64, took: u64) {
        self.total_count = total_count;
        self.took = took;
    }

    /// Number of pages implied by the total count.
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(u64::from(self.page_size))
    }
}
