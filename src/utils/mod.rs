//! Utils - Display Formatting

pub mod format;
