//! Domain - Pure Data Structures
//!
//! Records, derived values, filter and sort specifications. Nothing here
//! performs I/O.

pub mod column;
pub mod entity;
pub mod filter;
pub mod record;
pub mod sort;
pub mod value;

pub use column::{Column, ColumnWidth};
pub use entity::EntityType;
pub use filter::{FilterCondition, LogicalOperator, Operator, filter_schema, validate_filters};
pub use record::{Record, RecordSet};
pub use sort::{SortDirection, SortSpec};
pub use value::{FieldValue, parse_timestamp};
