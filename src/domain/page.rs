//! Pagination types
//!
//! `PageRequest` is the caller-side slice selector, `Page` the result
//! slice plus totals. Page numbers are zero-based.

use super::errors::CarelogError;
use super::result::Result;
use serde::{Deserialize, Serialize};

/// Default page size applied when the caller does not specify one
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A request for one page of an ordered result set
///
/// Constructed through [`PageRequest::new`] only, so a zero size can
/// never reach the stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Creates a page request
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `size` is zero.
    pub fn new(page: u32, size: u32) -> Result<Self> {
        if size == 0 {
            return Err(CarelogError::InvalidArgument(
                "page size must be at least 1".to_string(),
            ));
        }
        Ok(Self { page, size })
    }

    /// Zero-based page number
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of elements on the page
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Index of the first element of the page within the full result set
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// A bounded slice of an ordered result set plus totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Elements of this page, in result-set order
    pub content: Vec<T>,

    /// Total number of elements across all pages
    pub total_elements: u64,

    /// Total number of pages at the requested page size
    pub total_pages: u32,

    /// Zero-based number of this page
    pub page_number: u32,

    /// Requested page size (the content may be shorter on the last page)
    pub page_size: u32,
}

impl<T> Page<T> {
    /// Assembles a page from its content slice and the overall total
    pub fn new(content: Vec<T>, total_elements: u64, request: &PageRequest) -> Self {
        let size = u64::from(request.size());
        let total_pages = total_elements.div_ceil(size).min(u64::from(u32::MAX)) as u32;

        Self {
            content,
            total_elements,
            total_pages,
            page_number: request.page(),
            page_size: request.size(),
        }
    }

    /// An empty page for the given request
    pub fn empty(request: &PageRequest) -> Self {
        Self::new(Vec::new(), 0, request)
    }

    /// Number of elements on this page
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// True when this page carries no elements
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// True when pages exist after this one
    pub fn has_next(&self) -> bool {
        u64::from(self.page_number) + 1 < u64::from(self.total_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_request_rejects_zero_size() {
        assert!(matches!(
            PageRequest::new(0, 0),
            Err(CarelogError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_request_defaults() {
        let req = PageRequest::default();
        assert_eq!(req.page(), 0);
        assert_eq!(req.size(), DEFAULT_PAGE_SIZE);
    }

    #[test_case(0, 5, 0 ; "first page")]
    #[test_case(3, 5, 15 ; "later page")]
    #[test_case(2, 10, 20 ; "default size")]
    fn test_offset(page: u32, size: u32, expected: u64) {
        assert_eq!(PageRequest::new(page, size).unwrap().offset(), expected);
    }

    #[test_case(0, 10, 0 ; "empty set has zero pages")]
    #[test_case(1, 10, 1 ; "single element")]
    #[test_case(10, 10, 1 ; "exact fit")]
    #[test_case(11, 10, 2 ; "spill into second page")]
    fn test_total_pages(total: u64, size: u32, expected: u32) {
        let req = PageRequest::new(0, size).unwrap();
        let page: Page<u32> = Page::new(Vec::new(), total, &req);
        assert_eq!(page.total_pages, expected);
    }

    #[test]
    fn test_has_next() {
        let req = PageRequest::new(0, 2).unwrap();
        let page = Page::new(vec![1, 2], 5, &req);
        assert!(page.has_next());

        let req = PageRequest::new(2, 2).unwrap();
        let page = Page::new(vec![5], 5, &req);
        assert!(!page.has_next());
    }

    #[test]
    fn test_empty() {
        let page: Page<u8> = Page::empty(&PageRequest::default());
        assert!(page.is_empty());
        assert_eq!(page.len(), 0);
        assert_eq!(page.total_pages, 0);
    }
}
