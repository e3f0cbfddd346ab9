//! Offset windows for analysis queries.
//!
//! Tenable.sc pages analysis results with a `[startOffset, endOffset)`
//! window. Nothing advances pages automatically; callers move the window
//! and issue the next query themselves.

use serde::{Deserialize, Serialize};

/// Default number of records per analysis page.
pub const DEFAULT_PAGE_SIZE: u64 = 50;

/// A `[start, end)` record window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OffsetWindow {
    /// Offset of the first record.
    pub start: u64,
    /// Offset one past the last record.
    pub end: u64,
}

impl Default for OffsetWindow {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

impl OffsetWindow {
    /// Create a window. `end` is clamped to be at least `start`.
    #[must_use]
    pub fn new(start: u64, end: u64) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// The first window of `size` records.
    #[must_use]
    pub fn first(size: u64) -> Self {
        Self::new(0, size)
    }

    /// Number of records covered.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// The window directly after this one, with the same size.
    #[must_use]
    pub fn next(&self) -> Self {
        Self::new(self.end, self.end.saturating_add(self.size()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window() {
        let window = OffsetWindow::default();
        assert_eq!(window, OffsetWindow::new(0, 50));
        assert_eq!(window.size(), 50);
    }

    #[test]
    fn test_next_window_keeps_size() {
        let window = OffsetWindow::new(0, 25).next();
        assert_eq!(window, OffsetWindow::new(25, 50));
        assert_eq!(window.next(), OffsetWindow::new(50, 75));
    }

    #[test]
    fn test_inverted_window_is_clamped() {
        let window = OffsetWindow::new(10, 5);
        assert_eq!(window.end, 10);
        assert_eq!(window.size(), 0);
        assert_eq!(window.next(), window);
    }

    #[test]
    fn test_size_of_hand_built_inverted_window() {
        let window = OffsetWindow { start: 10, end: 5 };
        assert_eq!(window.size(), 0);
        assert_eq!(window.next(), OffsetWindow::new(5, 5));
    }
}
