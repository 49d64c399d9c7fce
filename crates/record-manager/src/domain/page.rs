//! Pagination
//!
//! The paginated response body and the 1-based page cursor derived from it.

use serde::{Deserialize, Serialize};

/// Page size the backend uses unless told otherwise
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// One page of a collection: `{ count, results }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PageBody<T>")]
pub struct Page<T> {
    /// Total matches across all pages
    pub count: u64,
    /// The records on this page
    pub results: Vec<T>,
}

/// Wire shapes accepted for a list response.
///
/// Unpaginated viewsets answer with a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum PageBody<T> {
    Paged { count: u64, results: Vec<T> },
    Bare(Vec<T>),
}

impl<T> From<PageBody<T>> for Page<T> {
    fn from(body: PageBody<T>) -> Self {
        match body {
            PageBody::Paged { count, results } => Page { count, results },
            PageBody::Bare(results) => Page { count: results.len() as u64, results },
        }
    }
}

/// `ceil(count / page_size)`
pub fn total_pages(count: u64, page_size: u32) -> u32 {
    let size = u64::from(page_size.max(1));
    u32::try_from(count.div_ceil(size)).unwrap_or(u32::MAX)
}

/// Current page plus the derived page count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    pub page: u32,
    pub total_pages: u32,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self { page: 1, total_pages: 1 }
    }
}

impl PageCursor {
    /// Whether `page` is a valid target for navigation
    pub fn contains(&self, page: u32) -> bool {
        page >= 1 && page <= self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Record a fresh count; returns `true` when the page had to be clamped
    pub fn update_total(&mut self, count: u64, page_size: u32) -> bool {
        self.total_pages = total_pages(count, page_size);
        if self.total_pages >= 1 && self.page > self.total_pages {
            self.page = self.total_pages;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(23, 10), 3);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn test_page_body_shapes() {
        let paged: Page<u32> = serde_json::from_str(r#"{"count": 23, "next": null, "results": [1, 2]}"#).unwrap();
        assert_eq!(paged.count, 23);
        assert_eq!(paged.results, vec![1, 2]);

        let bare: Page<u32> = serde_json::from_str("[4, 5, 6]").unwrap();
        assert_eq!(bare.count, 3);
    }

    #[test]
    fn test_cursor_bounds() {
        let cursor = PageCursor { page: 1, total_pages: 3 };
        assert!(cursor.contains(3));
        assert!(!cursor.contains(0));
        assert!(!cursor.contains(4));
        assert!(!cursor.has_previous());
        assert!(cursor.has_next());
    }

    #[test]
    fn test_cursor_clamps_on_shrink() {
        let mut cursor = PageCursor { page: 3, total_pages: 3 };
        assert!(cursor.update_total(15, 10));
        assert_eq!(cursor.page, 2);

        // an empty collection keeps page 1
        let mut empty = PageCursor::default();
        assert!(!empty.update_total(0, 10));
        assert_eq!(empty.page, 1);
        assert_eq!(empty.total_pages, 0);
    }
}
