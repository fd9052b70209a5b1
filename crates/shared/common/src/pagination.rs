//! Page-based pagination types for list endpoints.

use serde::Serialize;

/// A 1-indexed page request with a fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    pub fn new(page: u64, per_page: u64) -> Self {
        Self { page, per_page }
    }

    /// Zero-indexed page number as expected by the ORM paginator
    pub fn index(&self) -> u64 {
        self.page.saturating_sub(1)
    }

    /// Calculate offset for database query
    pub fn offset(&self) -> u64 {
        self.index() * self.per_page
    }

    /// Whether this page exists for `total` items.
    ///
    /// Page 1 always exists so an empty listing renders instead of failing.
    pub fn is_within(&self, total: u64) -> bool {
        self.page >= 1 && (self.page == 1 || self.page <= total_pages(total, self.per_page))
    }
}

/// Paginated response wrapper
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    /// Create new paginated response
    pub fn new(data: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            data,
            meta: PaginationMeta {
                page: request.page,
                per_page: request.per_page,
                total,
                total_pages: total_pages(total, request.per_page),
            },
        }
    }

    pub fn has_next(&self) -> bool {
        self.meta.page < self.meta.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.meta.page > 1
    }
}

/// Number of pages needed for `total` items.
pub fn total_pages(total: u64, per_page: u64) -> u64 {
    if per_page > 0 {
        total.div_ceil(per_page)
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(1, 10).offset(), 0);
        assert_eq!(PageRequest::new(3, 10).offset(), 20);
        assert_eq!(PageRequest::new(0, 10).offset(), 0);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn test_page_bounds() {
        assert!(PageRequest::new(1, 10).is_within(0));
        assert!(PageRequest::new(2, 10).is_within(11));
        assert!(!PageRequest::new(3, 10).is_within(11));
        assert!(!PageRequest::new(0, 10).is_within(11));
    }

    #[test]
    fn test_navigation_flags() {
        let page: Paginated<u8> = Paginated::new(vec![1, 2], PageRequest::new(2, 2), 5);
        assert_eq!(page.meta.total_pages, 3);
        assert!(page.has_next());
        assert!(page.has_previous());
    }
}
