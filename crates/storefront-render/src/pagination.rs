//! Pagination state and the sliding page-button window.

use std::ops::RangeInclusive;

/// Pages shown on each side of the current page.
pub const WINDOW_RADIUS: u32 = 2;

/// Position within the catalog as last reported by a successful envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub current_page: u32,
    pub total_pages: u32,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
        }
    }
}

impl PaginationState {
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Page numbers that get a button: `cur-2 ..= cur+2`, clipped to
    /// `1 ..= total_pages`.
    #[must_use]
    pub fn window(&self) -> RangeInclusive<u32> {
        let start = self.current_page.saturating_sub(WINDOW_RADIUS).max(1);
        let end = self
            .current_page
            .saturating_add(WINDOW_RADIUS)
            .min(self.total_pages);
        start..=end
    }
}
