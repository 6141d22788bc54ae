//! Page envelope for the movie listing.
//!
//! The envelope mirrors the awards REST API's page response, field for field,
//! including its quirk for empty results: an empty page reports
//! `totalPages: 0` while a non-empty one reports at least 1.

use serde::{Deserialize, Serialize};

/// Page size used when none (or zero) is requested
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Sort descriptor; the listing is never sorted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortInfo {
    pub sorted: bool,
    pub unsorted: bool,
}

impl Default for SortInfo {
    fn default() -> Self {
        Self {
            sorted: false,
            unsorted: true,
        }
    }
}

/// Request-side page metadata echoed back in the envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pageable {
    pub sort: SortInfo,
    pub page_size: usize,
    pub page_number: usize,
    pub offset: usize,
    pub paged: bool,
    pub unpaged: bool,
}

/// One page of results plus its metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub pageable: Pageable,
    pub total_elements: usize,
    pub last: bool,
    pub total_pages: usize,
    pub first: bool,
    pub sort: SortInfo,
    pub number: usize,
    pub number_of_elements: usize,
    pub size: usize,
}

/// Slice boundaries for a requested page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Requested page clamped to the last existing page
    pub page: usize,
    pub size: usize,
    /// `ceil(total / size)`, zero when there are no elements
    pub total_pages: usize,
    pub start: usize,
    pub end: usize,
}

/// Calculate the slice for a page request
///
/// `page` defaults to 0 and `size` to [`DEFAULT_PAGE_SIZE`] (a size of 0 is
/// treated as absent). Out-of-range pages are clamped to the last page.
pub fn calculate_window(total: usize, page: Option<usize>, size: Option<usize>) -> PageWindow {
    let size = size.filter(|&s| s > 0).unwrap_or(DEFAULT_PAGE_SIZE);
    let total_pages = total.div_ceil(size);
    let page = page.unwrap_or(0).min(total_pages.saturating_sub(1));
    let start = page * size;
    let end = (start + size).min(total);

    PageWindow {
        page,
        size,
        total_pages,
        start,
        end,
    }
}

impl<T> Page<T> {
    /// Cut one page out of `items`, converting each element with `map`
    pub fn from_slice<S>(
        items: &[S],
        page: Option<usize>,
        size: Option<usize>,
        map: impl Fn(&S) -> T,
    ) -> Self {
        let total = items.len();
        let window = calculate_window(total, page, size);
        let content: Vec<T> = items[window.start..window.end].iter().map(map).collect();

        let pageable = Pageable {
            sort: SortInfo::default(),
            page_size: window.size,
            page_number: window.page,
            offset: window.start,
            paged: total > 0,
            unpaged: total == 0,
        };

        if content.is_empty() {
            return Self::empty(pageable, window);
        }

        let number_of_elements = content.len();
        Self {
            content,
            pageable,
            total_elements: total,
            last: window.page + 1 >= window.total_pages || total == 0,
            total_pages: window.total_pages.max(1),
            first: window.page == 0,
            sort: SortInfo::default(),
            number: window.page,
            number_of_elements,
            size: window.size,
        }
    }

    /// The envelope returned when the page has no content
    fn empty(pageable: Pageable, window: PageWindow) -> Self {
        Self {
            content: Vec::new(),
            pageable,
            total_elements: 0,
            last: true,
            total_pages: 0,
            first: true,
            sort: SortInfo::default(),
            number: window.page,
            number_of_elements: 0,
            size: window.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_defaults() {
        let w = calculate_window(25, None, None);
        assert_eq!(w.page, 0);
        assert_eq!(w.size, 10);
        assert_eq!(w.total_pages, 3);
        assert_eq!((w.start, w.end), (0, 10));
    }

    #[test]
    fn test_window_last_page_is_partial() {
        let w = calculate_window(25, Some(2), Some(10));
        assert_eq!((w.start, w.end), (20, 25));
    }

    #[test]
    fn test_window_out_of_bounds_is_clamped() {
        let w = calculate_window(25, Some(99), Some(10));
        assert_eq!(w.page, 2);
        assert_eq!(w.start, 20);
    }

    #[test]
    fn test_window_zero_size_uses_default() {
        let w = calculate_window(25, Some(0), Some(0));
        assert_eq!(w.size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_window_empty() {
        let w = calculate_window(0, Some(3), Some(5));
        assert_eq!(w.page, 0);
        assert_eq!(w.total_pages, 0);
        assert_eq!((w.start, w.end), (0, 0));
    }

    #[test]
    fn test_page_flags() {
        let items: Vec<u32> = (0..25).collect();

        let first = Page::from_slice(&items, Some(0), Some(10), |&x| x);
        assert!(first.first);
        assert!(!first.last);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.number_of_elements, 10);

        let last = Page::from_slice(&items, Some(2), Some(10), |&x| x);
        assert!(!last.first);
        assert!(last.last);
        assert_eq!(last.content, vec![20, 21, 22, 23, 24]);
        assert_eq!(last.pageable.offset, 20);
    }

    #[test]
    fn test_empty_page_envelope() {
        let items: Vec<u32> = Vec::new();
        let page = Page::from_slice(&items, None, None, |&x| x);

        assert!(page.content.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_elements, 0);
        assert!(page.first);
        assert!(page.last);
        assert_eq!(page.number_of_elements, 0);
        assert!(!page.pageable.paged);
        assert!(page.pageable.unpaged);
    }

    #[test]
    fn test_serializes_camel_case() {
        let items = vec![1u32];
        let page = Page::from_slice(&items, None, Some(5), |&x| x);
        let json = serde_json::to_value(&page).unwrap();

        assert_eq!(json["totalElements"], 1);
        assert_eq!(json["numberOfElements"], 1);
        assert_eq!(json["pageable"]["pageSize"], 5);
        assert_eq!(json["sort"]["unsorted"], true);
    }
}
