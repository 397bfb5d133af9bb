//! State - Browser View State
//!
//! `BrowserState` holds what the user asked for; `RecordBrowser` owns it
//! together with the record snapshot and the derived page.

pub mod browser_state;
pub mod record_browser;

pub use browser_state::{BrowserState, PaginationState};
pub use record_browser::RecordBrowser;
