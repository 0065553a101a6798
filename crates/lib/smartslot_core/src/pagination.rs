//! Offset/limit pagination over list queries.

use serde::{Deserialize, Serialize};

/// Default page size when the client sends none.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Hard ceiling on page size.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Query parameters accepted by every list endpoint.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageQuery {
    /// 1-based page number, floored at 1.
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Items per page, clamped to `1..=MAX_PAGE_SIZE`.
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    /// SQL offset for this page.
    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }
}

/// Page metadata reported alongside every list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total_items: i64,
    pub item_count: i64,
    pub items_per_page: i64,
    pub total_pages: i64,
    pub current_page: i64,
}

/// One page of items plus metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    /// Wrap one page of rows, computing the metadata from the total count.
    pub fn new(items: Vec<T>, total_items: i64, page: i64, items_per_page: i64) -> Self {
        let total_pages = if total_items == 0 {
            0
        } else {
            (total_items + items_per_page - 1) / items_per_page
        };
        let meta = PageMeta {
            total_items,
            item_count: items.len() as i64,
            items_per_page,
            total_pages,
            current_page: page,
        };
        Self { items, meta }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_offset() {
        let q = PageQuery::default();
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(q.offset(), 0);

        let q = PageQuery {
            page: Some(3),
            limit: Some(10),
        };
        assert_eq!(q.offset(), 20);
    }

    #[test]
    fn limit_is_clamped() {
        let q = PageQuery {
            page: Some(0),
            limit: Some(10_000),
        };
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), MAX_PAGE_SIZE);
    }

    #[test]
    fn meta_for_partial_final_page() {
        let page = Page::new(vec![1, 2, 3], 23, 5, 5);
        assert_eq!(
            page.meta,
            PageMeta {
                total_items: 23,
                item_count: 3,
                items_per_page: 5,
                total_pages: 5,
                current_page: 5,
            }
        );
    }

    #[test]
    fn meta_for_empty_result() {
        let page: Page<i32> = Page::new(vec![], 0, 1, 20);
        assert_eq!(page.meta.total_pages, 0);
        assert_eq!(page.meta.item_count, 0);
    }
}
