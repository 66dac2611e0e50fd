//! Error types for the CAM tools crate.
//!
//! This module provides structured error types for the toolpath pipeline
//! and for source markup processing.

use inkplot_core::ToolpathError;
use inkplot_settings::SettingsError;
use std::io;
use thiserror::Error;

/// Errors that can occur while turning vector paths into G-code.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// A fatal geometry pipeline error (malformed transform, nothing to plot).
    #[error(transparent)]
    Toolpath(#[from] ToolpathError),

    /// The supplied configuration was rejected.
    #[error("Configuration error: {0}")]
    Settings(#[from] SettingsError),

    /// A file format error occurred.
    #[error("File format error: {0}")]
    FileFormat(#[from] FileFormatError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

impl CamToolError {
    /// Check if this error means "nothing to plot"
    pub fn is_empty_geometry(&self) -> bool {
        matches!(self, Self::Toolpath(e) if e.is_empty_geometry())
    }
}

/// Errors related to source markup parsing.
#[derive(Error, Debug)]
pub enum FileFormatError {
    /// The SVG document could not be parsed.
    #[error("SVG parse error: {0}")]
    SvgParseError(String),

    /// The `d` attribute of a path could not be parsed.
    #[error("Invalid path data on path {index}: {reason}")]
    PathData { index: usize, reason: String },

    /// The file is empty or contains no usable data.
    #[error("Empty file: {0}")]
    EmptyFile(String),

    /// I/O error during file reading.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

/// Result type alias for file format operations.
pub type FileFormatResult<T> = Result<T, FileFormatError>;
