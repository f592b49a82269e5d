//! Client-side pagination for dashboard tables

use serde::{Deserialize, Serialize};

/// Pagination state of a table
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (0-based)
    pub page_index: usize,
    /// Items per page
    pub page_size: usize,
    /// Total number of items
    pub total_items: usize,
}

impl Pagination {
    pub fn new(page_index: usize, page_size: usize, total_items: usize) -> Self {
        Self {
            page_index,
            page_size,
            total_items,
        }
    }

    /// First item shown, 1-based; 0 when the table is empty
    pub fn start_item(&self) -> usize {
        if self.total_items == 0 {
            0
        } else {
            (self.page_index * self.page_size + 1).min(self.total_items)
        }
    }

    /// Last item shown, 1-based
    pub fn end_item(&self) -> usize {
        ((self.page_index + 1) * self.page_size).min(self.total_items)
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.end_item() < self.total_items
    }

    pub fn previous(self) -> Self {
        Self {
            page_index: self.page_index.saturating_sub(1),
            ..self
        }
    }

    pub fn next(self) -> Self {
        if self.has_next() {
            Self {
                page_index: self.page_index + 1,
                ..self
            }
        } else {
            self
        }
    }

    /// The rows of `items` on the current page
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.page_index * self.page_size).min(items.len());
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(0, 10, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window() {
        let page = Pagination::new(0, 10, 23);
        assert_eq!((page.start_item(), page.end_item()), (1, 10));
        assert!(!page.has_previous());
        let last = page.next().next();
        assert_eq!((last.start_item(), last.end_item()), (21, 23));
        assert!(!last.has_next());
        assert_eq!(last.next(), last);
        assert_eq!(last.previous().page_index, 1);
    }

    #[test]
    fn test_empty_table() {
        let page = Pagination::default();
        assert_eq!((page.start_item(), page.end_item()), (0, 0));
        assert!(page.slice::<u8>(&[]).is_empty());
    }

    #[test]
    fn test_slice() {
        let items: Vec<u32> = (1..=12).collect();
        assert_eq!(Pagination::new(1, 5, 12).slice(&items), &[6, 7, 8, 9, 10]);
        assert_eq!(Pagination::new(2, 5, 12).slice(&items), &[11, 12]);
        assert!(Pagination::new(9, 5, 12).slice(&items).is_empty());
    }
}
