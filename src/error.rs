//! Error types for crm-browser
//!
//! Centralized error handling using snafu for ergonomic error definitions.
//! The browsing pipeline itself never fails; these cover configuration,
//! filter construction and the data source boundary.

use snafu::Snafu;

/// Main error type for the crate
#[derive(Debug, Snafu)]
pub enum Error {
    /// Invalid input or configuration
    #[snafu(display("Invalid: {message}"))]
    Invalid { message: String },

    /// Filter condition rejected at construction time
    #[snafu(display("Invalid filter on '{field}': {message}"))]
    InvalidFilter { field: String, message: String },

    /// IO error (file operations)
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    /// JSON serialization/deserialization error
    #[snafu(display("JSON error: {source}"))]
    Json { source: serde_json::Error },

    /// TOML deserialization error
    #[snafu(display("TOML parse error: {source}"))]
    TomlDe { source: toml::de::Error },

    /// TOML serialization error
    #[snafu(display("TOML serialize error: {source}"))]
    TomlSe { source: toml::ser::Error },

    /// HTTP transport error
    #[snafu(display("HTTP error: {source}"))]
    Http { source: reqwest::Error },

    /// Non-success response from the CRM API
    #[snafu(display("API error ({status}): {message}"))]
    Api { status: u16, message: String },
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Json { source }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::TomlDe { source }
    }
}

impl From<toml::ser::Error> for Error {
    fn from(source: toml::ser::Error) -> Self {
        Error::TomlSe { source }
    }
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Error::Http { source }
    }
}

/// Result type alias for convenience
pub type Result<T, E = Error> = std::result::Result<T, E>;
