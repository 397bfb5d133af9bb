//! Pagination stage
//!
//! Page bounds are self-correcting: a requested page past the end clamps to
//! the last page that exists.

use serde::Serialize;

use crate::state::PaginationState;

/// Pagination metadata of a computed view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Effective (rendered) page, 1-based
    pub page: usize,
    pub page_size: usize,
    /// Records left after search and filters
    pub total_items: usize,
    /// `ceil(total_items / page_size)`, 0 for an empty result
    pub total_pages: usize,
    /// Slice bounds into the matched rows
    pub start: usize,
    pub end: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PageInfo {
    /// Number of rows on this page
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1))
}

/// Requested page clamped to `[1, max(total_pages, 1)]`
pub fn effective_page(requested: usize, total_items: usize, page_size: usize) -> usize {
    match total_pages(total_items, page_size) {
        0 => 1,
        pages => requested.clamp(1, pages),
    }
}

/// Compute the page to show for `total_items` matched rows
pub fn paginate(total_items: usize, pagination: &PaginationState) -> PageInfo {
    let page_size = pagination.page_size().max(1);
    let total_pages = total_pages(total_items, page_size);
    let page = effective_page(pagination.page(), total_items, page_size);
    let start = ((page - 1) * page_size).min(total_items);
    let end = (start + page_size).min(total_items);

    PageInfo {
        page,
        page_size,
        total_items,
        total_pages,
        start,
        end,
        has_previous: page > 1,
        has_next: page < total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_last_page() {
        let info = paginate(25, &PaginationState::new(3, 10));
        assert_eq!(info.page, 3);
        assert_eq!(info.total_pages, 3);
        assert_eq!((info.start, info.end), (20, 25));
        assert_eq!(info.len(), 5);
        assert!(info.has_previous);
        assert!(!info.has_next);
    }

    #[test]
    fn test_scenario_clamps_past_end() {
        let info = paginate(25, &PaginationState::new(5, 10));
        assert_eq!(info, paginate(25, &PaginationState::new(3, 10)));
    }

    #[test]
    fn test_empty_result() {
        let info = paginate(0, &PaginationState::new(4, 10));
        assert_eq!(info.page, 1);
        assert_eq!(info.total_pages, 0);
        assert!(info.is_empty());
        assert!(!info.has_previous);
        assert!(!info.has_next);
    }

    #[test]
    fn test_bounds_invariant() {
        for total in 0..40 {
            for page_size in 1..12 {
                let pages = total_pages(total, page_size);
                for requested in 1..10 {
                    let info = paginate(total, &PaginationState::new(requested, page_size));
                    assert!(info.page >= 1 && info.page <= pages.max(1));
                    assert!(info.len() <= page_size);
                    if info.page < pages {
                        assert_eq!(info.len(), page_size);
                    }
                    if total > 0 {
                        assert!(!info.is_empty(), "non-empty result never shows an empty page");
                    }
                }
            }
        }
    }

    #[test]
    fn test_exact_multiple() {
        let info = paginate(20, &PaginationState::new(2, 10));
        assert_eq!(info.total_pages, 2);
        assert_eq!((info.start, info.end), (10, 20));
    }
}
