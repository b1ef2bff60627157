//! Offset/limit pagination state.

use serde::Serialize;

/// Tracks where the next page starts and whether one exists.
///
/// `has_more` only goes from true to false through [`mark_exhausted`]; the
/// only way back is an explicit [`reset`].
///
/// [`mark_exhausted`]: PaginationCursor::mark_exhausted
/// [`reset`]: PaginationCursor::reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationCursor {
    offset: u32,
    page_size: u32,
    has_more: bool,
}

impl PaginationCursor {
    /// Creates a cursor at offset 0. A zero page size is raised to 1.
    pub fn new(page_size: u32) -> Self {
        Self {
            offset: 0,
            page_size: page_size.max(1),
            has_more: true,
        }
    }

    /// Offset of the next page.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Items requested per page.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Whether the upstream may have another page.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Returns `(offset, limit)` for the next list request.
    pub fn list_query(&self) -> (u32, u32) {
        (self.offset, self.page_size)
    }

    /// Moves past the current page and returns the new offset.
    pub fn advance(&mut self) -> u32 {
        self.offset = self.offset.saturating_add(self.page_size);
        self.offset
    }

    /// Records that the upstream has no further pages.
    pub fn mark_exhausted(&mut self) {
        self.has_more = false;
    }

    /// Returns to the first page.
    pub fn reset(&mut self) {
        self.offset = 0;
        self.has_more = true;
    }
}

impl Default for PaginationCursor {
    fn default() -> Self {
        Self::new(20)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_by_page_size() {
        let mut cursor = PaginationCursor::new(10);
        assert_eq!(cursor.list_query(), (0, 10));
        assert_eq!(cursor.advance(), 10);
        assert_eq!(cursor.advance(), 20);
        assert_eq!(cursor.list_query(), (20, 10));
    }

    #[test]
    fn test_exhaust_and_reset() {
        let mut cursor = PaginationCursor::new(10);
        cursor.advance();
        cursor.mark_exhausted();
        assert!(!cursor.has_more());
        assert_eq!(cursor.offset(), 10);

        cursor.reset();
        assert!(cursor.has_more());
        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.page_size(), 10);
    }

    #[test]
    fn test_zero_page_size_clamped() {
        assert_eq!(PaginationCursor::new(0).page_size(), 1);
    }
}
