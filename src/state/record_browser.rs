//! RecordBrowser
//!
//! Owns a record snapshot, the view state and the derived page. Every
//! operation updates the state and recomputes the pipeline once; a requested
//! page that no longer exists is corrected in the same step.

use ahash::AHashSet;
use std::sync::Arc;

use super::BrowserState;
use crate::accessors::FieldAccessor;
use crate::domain::{EntityType, FilterCondition, Record, RecordSet, SortSpec};
use crate::pipeline::{self, BrowserView, PageInfo};

/// Generic record browser parameterized by a field accessor strategy
pub struct RecordBrowser<A: FieldAccessor> {
    accessor: A,
    records: RecordSet,
    state: BrowserState,
    view: BrowserView,
    /// Selected record ids
    selection: AHashSet<String>,
    /// Bumped on every recompute
    revision: u64,
}

impl RecordBrowser<Box<dyn FieldAccessor>> {
    /// Create a browser for an entity type using its built-in accessor
    pub fn for_entity(entity: EntityType, page_size: usize) -> Self {
        Self::with_state(entity.accessor(), BrowserState::new(page_size))
    }
}

impl<A: FieldAccessor> RecordBrowser<A> {
    /// Create an empty browser with the default page size
    pub fn new(accessor: A) -> Self {
        Self::with_state(accessor, BrowserState::default())
    }

    /// Create an empty browser starting from an existing view state
    pub fn with_state(accessor: A, state: BrowserState) -> Self {
        let view = BrowserView::empty(&state);
        Self {
            accessor,
            records: Arc::new(Vec::new()),
            state,
            view,
            selection: AHashSet::new(),
            revision: 0,
        }
    }

    // ==================== Getters ====================

    pub fn accessor(&self) -> &A {
        &self.accessor
    }

    /// Full record snapshot
    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    /// Latest pipeline result
    pub fn view(&self) -> &BrowserView {
        &self.view
    }

    pub fn page_info(&self) -> &PageInfo {
        self.view.page_info()
    }

    /// Records on the current page
    pub fn visible_rows(&self) -> impl Iterator<Item = &Record> {
        self.view.rows(&self.records)
    }

    /// All records matching search and filters, in display order
    pub fn matched_rows(&self) -> impl Iterator<Item = &Record> {
        self.view
            .matched()
            .iter()
            .filter_map(|&index| self.records.get(index))
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ==================== Data ====================

    /// Replace the record snapshot, keeping the view state.
    ///
    /// Selected ids that no longer exist are dropped and the page is repaired
    /// if the new set is shorter.
    pub fn set_records(&mut self, records: impl Into<RecordSet>) {
        self.records = records.into();
        let known: AHashSet<String> = self.records.iter().filter_map(Record::id).collect();
        self.selection.retain(|id| known.contains(id));
        tracing::debug!(
            entity = %self.accessor.entity_type(),
            count = self.records.len(),
            "Loaded records"
        );
        self.recompute();
    }

    // ==================== View operations ====================

    /// Set the search text; returns to page 1
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.state.set_search_text(text);
        self.recompute();
    }

    /// Replace the filter list; returns to page 1
    pub fn set_filters(&mut self, filters: Vec<FilterCondition>) {
        self.state.set_filters(filters);
        self.recompute();
    }

    /// Append a filter; returns to page 1
    pub fn add_filter(&mut self, filter: FilterCondition) {
        self.state.add_filter(filter);
        self.recompute();
    }

    /// Remove the filter at `index`
    pub fn remove_filter(&mut self, index: usize) -> Option<FilterCondition> {
        let removed = self.state.remove_filter(index)?;
        self.recompute();
        Some(removed)
    }

    pub fn clear_filters(&mut self) {
        self.set_filters(Vec::new());
    }

    /// Sort by `spec`, toggling direction when the field is already active.
    ///
    /// Returns false (and changes nothing) when the field is not sortable.
    pub fn set_sort(&mut self, spec: SortSpec) -> bool {
        if !self.accessor.is_sortable(&spec.field) {
            tracing::warn!(
                entity = %self.accessor.entity_type(),
                field = %spec.field,
                "Ignoring sort on non-sortable field"
            );
            return false;
        }
        self.state.set_sort(spec);
        self.recompute();
        true
    }

    /// Column-header click: ascending first, toggles on repeat
    pub fn sort_by(&mut self, field: &str) -> bool {
        self.set_sort(SortSpec::asc(field))
    }

    pub fn clear_sort(&mut self) {
        self.state.clear_sort();
        self.recompute();
    }

    pub fn set_page(&mut self, page: usize) {
        self.state.set_page(page);
        self.recompute();
    }

    pub fn next_page(&mut self) {
        if self.page_info().has_next {
            self.set_page(self.page_info().page + 1);
        }
    }

    pub fn previous_page(&mut self) {
        if self.page_info().has_previous {
            self.set_page(self.page_info().page - 1);
        }
    }

    /// Change the page size; returns to page 1
    pub fn set_page_size(&mut self, size: usize) {
        self.state.set_page_size(size);
        self.recompute();
    }

    // ==================== Selection ====================

    /// Toggle a record id in the selection; returns whether it is now selected
    pub fn toggle_selected(&mut self, id: &str) -> bool {
        if self.selection.remove(id) {
            false
        } else {
            self.selection.insert(id.to_string());
            true
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    pub fn selected_ids(&self) -> &AHashSet<String> {
        &self.selection
    }

    /// Selected records in snapshot order
    pub fn selected_records(&self) -> impl Iterator<Item = &Record> {
        self.records
            .iter()
            .filter(|r| r.id().is_some_and(|id| self.selection.contains(&id)))
    }

    /// Add every record on the current page to the selection
    pub fn select_visible(&mut self) {
        let ids: Vec<String> = self.visible_rows().filter_map(Record::id).collect();
        self.selection.extend(ids);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ==================== Internals ====================

    fn recompute(&mut self) {
        let view = pipeline::run(&self.records, &self.state, &self.accessor);
        let effective = view.page_info().page;
        if effective != self.state.page() {
            tracing::debug!(
                requested = self.state.page(),
                effective,
                "Clamped page to available range"
            );
            self.state.correct_page(effective);
        }
        self.view = view;
        self.revision += 1;
    }
}
