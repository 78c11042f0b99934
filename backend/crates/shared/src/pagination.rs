//! Pagination
//!
//! Page request/response shapes shared by every listing endpoint.

use serde::{Deserialize, Serialize};

/// Largest page a caller may request
pub const MAX_PAGE_SIZE: u32 = 100;

/// 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageQuery {
    pub page: u32,
    pub page_size: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 20,
        }
    }
}

impl PageQuery {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }.normalized()
    }

    /// Clamp to `page >= 1` and `1 <= page_size <= MAX_PAGE_SIZE`
    pub fn normalized(self) -> Self {
        Self {
            page: self.page.max(1),
            page_size: self.page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Number of rows to skip
    pub fn offset(&self) -> usize {
        let q = self.normalized();
        (q.page as usize - 1) * q.page_size as usize
    }
}

/// One page of rows plus pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub pages: u64,
}

impl<T> Page<T> {
    /// Slice an already filtered, ordered collection
    pub fn from_items(items: Vec<T>, query: PageQuery) -> Self {
        let query = query.normalized();
        let total = items.len() as u64;
        let rows = items
            .into_iter()
            .skip(query.offset())
            .take(query.page_size as usize)
            .collect();
        Self::new(rows, query, total)
    }

    pub fn new(rows: Vec<T>, query: PageQuery, total: u64) -> Self {
        let query = query.normalized();
        let size = u64::from(query.page_size);
        Self {
            rows,
            page: query.page,
            page_size: query.page_size,
            total,
            pages: total.div_ceil(size),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            rows: self.rows.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total: self.total,
            pages: self.pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_normalization() {
        let q = PageQuery::new(0, 0);
        assert_eq!(q.page, 1);
        assert_eq!(q.page_size, 1);

        let q = PageQuery::new(3, 10_000);
        assert_eq!(q.page_size, MAX_PAGE_SIZE);
        assert_eq!(q.offset(), 200);
    }

    #[test]
    fn test_from_items_slices_and_counts() {
        let page = Page::from_items((1..=45).collect::<Vec<_>>(), PageQuery::new(3, 20));
        assert_eq!(page.rows, (41..=45).collect::<Vec<_>>());
        assert_eq!(page.total, 45);
        assert_eq!(page.pages, 3);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let page = Page::from_items(vec![1, 2, 3], PageQuery::new(5, 2));
        assert!(page.rows.is_empty());
        assert_eq!(page.total, 3);
        assert_eq!(page.pages, 2);
    }

    #[test]
    fn test_map_keeps_metadata() {
        let page = Page::from_items(vec![1, 2], PageQuery::default()).map(|n| n * 10);
        assert_eq!(page.rows, vec![10, 20]);
        assert_eq!(page.page_size, 20);
    }
}
