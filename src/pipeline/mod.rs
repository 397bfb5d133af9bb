//! Browsing Pipeline
//!
//! search → structured filters → sort → paginate, recomputed from scratch on
//! every state change. Stages operate on row indices into the record set so
//! records are never copied or mutated.
//!
//! ```text
//! records ──▶ search ──▶ filter ──▶ sort ──▶ paginate ──▶ BrowserView
//! ```

pub mod filter;
pub mod pagination;
pub mod search;
pub mod sort;

pub use pagination::PageInfo;

use crate::accessors::FieldAccessor;
use crate::domain::Record;
use crate::state::BrowserState;

/// Result of one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserView {
    /// Indices of all matching records, in display order
    matched: Vec<usize>,
    page: PageInfo,
    unfiltered_count: usize,
}

impl BrowserView {
    /// View of an empty record set
    pub fn empty(state: &BrowserState) -> Self {
        Self {
            matched: Vec::new(),
            page: pagination::paginate(0, state.pagination()),
            unfiltered_count: 0,
        }
    }

    pub fn page_info(&self) -> &PageInfo {
        &self.page
    }

    /// Indices of every matching record, in display order
    pub fn matched(&self) -> &[usize] {
        &self.matched
    }

    /// Indices of the records on the current page
    pub fn visible(&self) -> &[usize] {
        &self.matched[self.page.start..self.page.end]
    }

    /// Records on the current page
    pub fn rows<'a>(&'a self, records: &'a [Record]) -> impl Iterator<Item = &'a Record> + 'a {
        self.visible().iter().filter_map(|&index| records.get(index))
    }

    /// Number of records before search and filters
    pub fn unfiltered_count(&self) -> usize {
        self.unfiltered_count
    }
}

/// Run the full pipeline. Pure: no I/O, no state changes.
pub fn run<A: FieldAccessor + ?Sized>(
    records: &[Record],
    state: &BrowserState,
    accessor: &A,
) -> BrowserView {
    let mut rows: Vec<usize> = (0..records.len()).collect();

    search::apply(records, &mut rows, state.search_text(), accessor);
    let searched = rows.len();
    filter::apply(records, &mut rows, state.filters(), accessor);
    let filtered = rows.len();
    sort::apply(records, &mut rows, state.sort(), accessor);

    let page = pagination::paginate(rows.len(), state.pagination());

    tracing::debug!(
        entity = %accessor.entity_type(),
        total = records.len(),
        searched,
        filtered,
        page = page.page,
        total_pages = page.total_pages,
        "Pipeline recomputed"
    );

    BrowserView {
        matched: rows,
        page,
        unfiltered_count: records.len(),
    }
}
