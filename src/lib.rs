//! CRM Record Browser Library
//!
//! Client-side browsing of CRM collections (contacts, companies, deals,
//! leads, tasks): free-text search, structured filters, a stable single-key
//! sort and self-correcting pagination over a fetched record snapshot.

pub mod accessors;
pub mod cli;
pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod helpers;
pub mod pipeline;
pub mod services;
pub mod state;
pub mod utils;

pub use accessors::FieldAccessor;
pub use error::{Error, Result};
pub use state::{BrowserState, RecordBrowser};
