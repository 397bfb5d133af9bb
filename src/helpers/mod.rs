//! Helper Utilities
//!
//! Filesystem locations and token encryption.

mod fs;
mod string;

pub use fs::*;
pub use string::*;
