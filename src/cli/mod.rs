//! Command-line front end
//!
//! Argument parsing and text/JSON rendering of a browser page.

pub mod args;
pub mod render;

pub use args::CliArgs;
pub use render::{render_json, render_table};
