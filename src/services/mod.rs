//! Services - Record Data Sources
//!
//! The only async boundary of the crate. A `DataSource` delivers a complete
//! snapshot per entity type; browsing over that snapshot is synchronous.
//!
//! ```text
//! DataSource::fetch_all ──▶ RecordSet ──▶ RecordBrowser::set_records
//! ```

mod data_source;
mod http;
mod memory;

pub use data_source::{Credential, DataSource};
pub use http::HttpDataSource;
pub use memory::MemoryDataSource;
