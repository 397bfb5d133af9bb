//! Browsing Constants
//!
//! Centralized defaults shared by the pipeline, the data source and the CLI.

/// Rows per page when nothing else is configured
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page size requested from the CRM API to approximate "fetch everything".
///
/// Collections larger than this are truncated; the HTTP data source logs a
/// warning when the API reports more records than it returned.
pub const FETCH_ALL_LIMIT: usize = 1000;

/// Display/search text for a missing derived field
pub const MISSING_FIELD_SENTINEL: &str = "--";

/// Owner text when a record has no owner
pub const UNASSIGNED_OWNER: &str = "Unassigned";

/// Default CRM API base URL
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

/// HTTP request timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Widest cell the text renderer prints before truncating
pub const MAX_CELL_WIDTH: usize = 32;
