//! Error types for cascading table delegates.
//!
//! Dispatch itself never fails: unresolvable coordinates are answered with
//! neutral values. Errors only arise while loading configuration or when a
//! caller asks for a children check to be treated as fatal.

use std::path::PathBuf;

use crate::validation::ValidationIssue;

/// Result type alias for cascading table operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced outside of dispatch.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration text could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration file could not be read.
    #[error("Failed to read configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A children list failed its consistency check.
    #[error("Inconsistent child delegates: {0}")]
    Validation(ValidationIssue),
}

impl Error {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<ValidationIssue> for Error {
    fn from(issue: ValidationIssue) -> Self {
        Self::Validation(issue)
    }
}
