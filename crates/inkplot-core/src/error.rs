//! Error handling for InkPlot
//!
//! Provides the error types shared by every stage of the toolpath pipeline:
//! - Toolpath errors (transform parsing, empty geometry, bad configuration)
//! - A unified [`Error`] for public APIs that also carries I/O failures
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Toolpath error type
///
/// Represents the fatal conditions of the geometry pipeline. Filtering stages
/// (dedupe, compound split, tiny-path filter) never produce these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToolpathError {
    /// A `matrix(...)` transform contained a token that is not a number,
    /// or did not contain exactly six values.
    #[error("Malformed transform on path {path_index}: {reason}")]
    Parse {
        /// Index of the path whose transform string failed to parse.
        path_index: usize,
        /// What was wrong with the transform.
        reason: String,
    },

    /// There is nothing to plot: the document is empty after curation, or its
    /// bounds cannot be computed.
    #[error("Empty geometry: {0}")]
    EmptyGeometry(String),

    /// A configuration value makes the pipeline undefined.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ToolpathError {
    /// Create a parse error for the given path
    pub fn parse(path_index: usize, reason: impl Into<String>) -> Self {
        Self::Parse {
            path_index,
            reason: reason.into(),
        }
    }

    /// Create an empty-geometry error
    pub fn empty(reason: impl Into<String>) -> Self {
        Self::EmptyGeometry(reason.into())
    }

    /// Check if this error means "nothing to plot"
    pub fn is_empty_geometry(&self) -> bool {
        matches!(self, Self::EmptyGeometry(_))
    }
}

/// Main error type for InkPlot
///
/// A unified error type that can represent any error from the core layer.
#[derive(Error, Debug)]
pub enum Error {
    /// Toolpath error
    #[error(transparent)]
    Toolpath(#[from] ToolpathError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a toolpath error
    pub fn is_toolpath_error(&self) -> bool {
        matches!(self, Error::Toolpath(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

/// Result type for pipeline stages
pub type ToolpathResult<T> = std::result::Result<T, ToolpathError>;
