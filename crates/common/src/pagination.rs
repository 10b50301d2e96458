//! Page-numbered result envelopes.
//!
//! Listing endpoints return a [`Page`] wrapping the items for the requested
//! page plus [`PageMeta`] describing the overall result set.

use serde::Serialize;

/// A single page of results plus pagination metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// Items on this page (may be empty).
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

/// Pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// 1-based page number that was requested.
    pub page: u64,
    /// Total number of pages for the full result set.
    pub page_count: u64,
    /// Total number of matching items across all pages.
    pub total_count: u64,
    /// Whether a later page exists.
    pub has_next_page: bool,
    /// Whether an earlier page exists.
    pub has_previous_page: bool,
}

impl PageMeta {
    /// Compute metadata for a 1-based `page` of size `limit` over
    /// `total_count` matching items.
    #[must_use]
    pub const fn new(page: u64, limit: u64, total_count: u64) -> Self {
        let page_count = if limit == 0 {
            0
        } else {
            total_count.div_ceil(limit)
        };

        Self {
            page,
            page_count,
            total_count,
            has_next_page: page < page_count,
            has_previous_page: page > 1,
        }
    }
}

impl<T> Page<T> {
    /// Wrap a page of items with computed metadata.
    #[must_use]
    pub const fn new(data: Vec<T>, page: u64, limit: u64, total_count: u64) -> Self {
        Self {
            data,
            meta: PageMeta::new(page, limit, total_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count_is_ceiling() {
        assert_eq!(PageMeta::new(1, 10, 0).page_count, 0);
        assert_eq!(PageMeta::new(1, 10, 1).page_count, 1);
        assert_eq!(PageMeta::new(1, 10, 10).page_count, 1);
        assert_eq!(PageMeta::new(1, 10, 11).page_count, 2);
        assert_eq!(PageMeta::new(1, 3, 7).page_count, 3);
    }

    #[test]
    fn test_next_and_previous_flags() {
        let meta = PageMeta::new(1, 10, 25);
        assert!(meta.has_next_page);
        assert!(!meta.has_previous_page);

        let meta = PageMeta::new(2, 10, 25);
        assert!(meta.has_next_page);
        assert!(meta.has_previous_page);

        let meta = PageMeta::new(3, 10, 25);
        assert!(!meta.has_next_page);
        assert!(meta.has_previous_page);
    }

    #[test]
    fn test_page_beyond_last_has_no_next() {
        // Requesting a page past the end yields empty data and no next page.
        let page: Page<i32> = Page::new(vec![], 5, 10, 25);
        assert!(page.data.is_empty());
        assert!(!page.meta.has_next_page);
        assert_eq!(page.meta.page_count, 3);
    }

    #[test]
    fn test_empty_result_set_is_not_an_error() {
        let page: Page<i32> = Page::new(vec![], 1, 10, 0);
        assert!(page.data.is_empty());
        assert_eq!(page.meta.total_count, 0);
        assert!(!page.meta.has_next_page);
        assert!(!page.meta.has_previous_page);
    }
}
