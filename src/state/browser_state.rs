//! BrowserState - View State of a Record Browser
//!
//! Search text, filters, sort and pagination. The state transitions here
//! encode which changes send the user back to the first page.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PAGE_SIZE;
use crate::domain::{FilterCondition, SortSpec};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PaginationRepr {
    page: usize,
    page_size: usize,
}

impl Default for PaginationRepr {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Requested page and page size, both at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PaginationRepr", rename_all = "camelCase")]
pub struct PaginationState {
    page: usize,
    page_size: usize,
}

impl From<PaginationRepr> for PaginationState {
    fn from(repr: PaginationRepr) -> Self {
        Self::new(repr.page, repr.page_size)
    }
}

impl PaginationState {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Requested page (1-based), possibly beyond the last page
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Change the page size and go back to the first page
    pub fn set_page_size(&mut self, size: usize) {
        self.page_size = size.max(1);
        self.page = 1;
    }

    pub fn reset_page(&mut self) {
        self.page = 1;
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// Complete view state owned by a record browser
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrowserState {
    search_text: String,
    filters: Vec<FilterCondition>,
    sort: Option<SortSpec>,
    pagination: PaginationState,
}

impl BrowserState {
    /// Create an initial state with the given page size
    pub fn new(page_size: usize) -> Self {
        Self {
            pagination: PaginationState::new(1, page_size),
            ..Self::default()
        }
    }

    // ==================== Getters ====================

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn filters(&self) -> &[FilterCondition] {
        &self.filters
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn page(&self) -> usize {
        self.pagination.page()
    }

    pub fn page_size(&self) -> usize {
        self.pagination.page_size()
    }

    // ==================== Transitions ====================

    /// Set the search text; always returns to page 1
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.pagination.reset_page();
    }

    /// Replace the filter list; always returns to page 1
    pub fn set_filters(&mut self, filters: Vec<FilterCondition>) {
        self.filters = filters;
        self.pagination.reset_page();
    }

    /// Append a filter; returns to page 1
    pub fn add_filter(&mut self, filter: FilterCondition) {
        self.filters.push(filter);
        self.pagination.reset_page();
    }

    /// Remove the filter at `index`; returns to page 1 when one was removed
    pub fn remove_filter(&mut self, index: usize) -> Option<FilterCondition> {
        if index >= self.filters.len() {
            return None;
        }
        let removed = self.filters.remove(index);
        self.pagination.reset_page();
        Some(removed)
    }

    /// Apply a sort. Re-selecting the active field toggles its direction
    /// instead of taking the requested one. The page is kept.
    pub fn set_sort(&mut self, spec: SortSpec) {
        self.sort = match self.sort.take() {
            Some(current) if current.field == spec.field => Some(current.toggled()),
            _ => Some(spec),
        };
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    pub fn set_page(&mut self, page: usize) {
        self.pagination.set_page(page);
    }

    /// Change the page size; returns to page 1
    pub fn set_page_size(&mut self, size: usize) {
        self.pagination.set_page_size(size);
    }

    /// Store the page the pipeline actually rendered
    pub(crate) fn correct_page(&mut self, effective_page: usize) {
        self.pagination.set_page(effective_page);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Operator, SortDirection};

    fn state_on_page(page: usize) -> BrowserState {
        let mut state = BrowserState::new(10);
        state.set_page(page);
        state
    }

    #[test]
    fn test_initial_state() {
        let state = BrowserState::new(25);
        assert_eq!(state.search_text(), "");
        assert!(state.filters().is_empty());
        assert!(state.sort().is_none());
        assert_eq!(state.page(), 1);
        assert_eq!(state.page_size(), 25);
    }

    #[test]
    fn test_search_resets_page() {
        let mut state = state_on_page(4);
        state.set_search_text("acme");
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_filter_changes_reset_page() {
        let mut state = state_on_page(3);
        state.add_filter(FilterCondition::new("stage", Operator::Equals, "won"));
        assert_eq!(state.page(), 1);

        state.set_page(3);
        assert!(state.remove_filter(5).is_none());
        assert_eq!(state.page(), 3);
        assert!(state.remove_filter(0).is_some());
        assert_eq!(state.page(), 1);

        state.set_page(2);
        state.set_filters(Vec::new());
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_sort_keeps_page_and_toggles() {
        let mut state = state_on_page(2);
        state.set_sort(SortSpec::asc("amount"));
        assert_eq!(state.page(), 2);

        state.set_sort(SortSpec::asc("amount"));
        assert_eq!(state.sort().map(|s| s.direction), Some(SortDirection::Desc));
        state.set_sort(SortSpec::asc("amount"));
        assert_eq!(state.sort().map(|s| s.direction), Some(SortDirection::Asc));

        state.set_sort(SortSpec::desc("title"));
        assert_eq!(state.sort(), Some(&SortSpec::desc("title")));
    }

    #[test]
    fn test_page_size_resets_page_and_clamps() {
        let mut state = state_on_page(5);
        state.set_page_size(0);
        assert_eq!(state.page_size(), 1);
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_page_navigation_preserves_rest() {
        let mut state = BrowserState::new(10);
        state.set_search_text("acme");
        state.set_sort(SortSpec::asc("name"));
        state.set_page(0);
        assert_eq!(state.page(), 1);
        state.set_page(7);
        assert_eq!(state.page(), 7);
        assert_eq!(state.search_text(), "acme");
        assert!(state.sort().is_some());
    }

    #[test]
    fn test_deserialize_partial_pagination() {
        let state: BrowserState =
            serde_json::from_str(r#"{"pagination":{"page":2}}"#).expect("valid state");
        assert_eq!(state.page(), 2);
        assert_eq!(state.page_size(), DEFAULT_PAGE_SIZE);

        let state: BrowserState =
            serde_json::from_str(r#"{"pagination":{"pageSize":25}}"#).expect("valid state");
        assert_eq!(state.page(), 1);
        assert_eq!(state.page_size(), 25);
    }

    #[test]
    fn test_deserialize_clamps_pagination() {
        let state: BrowserState =
            serde_json::from_str(r#"{"searchText":"x","pagination":{"page":0,"pageSize":0}}"#)
                .expect("valid state");
        assert_eq!(state.page(), 1);
        assert_eq!(state.page_size(), 1);
        assert_eq!(state.search_text(), "x");
    }
}
