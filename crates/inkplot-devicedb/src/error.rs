//! Error types for the device database crate.
//!
//! This module provides structured error types for printer profile lookup
//! and page scale selection.

use std::io;
use thiserror::Error;

/// Errors that can occur during printer profile operations.
#[derive(Error, Debug)]
pub enum DeviceError {
    /// The requested profile was not found.
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    /// A profile with this name already exists.
    #[error("Profile already exists: {0}")]
    ProfileAlreadyExists(String),

    /// Failed to load profiles from storage.
    #[error("Failed to load profiles: {0}")]
    LoadError(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// A profile or scale validation error occurred.
    #[error("Validation error: {0}")]
    Validation(#[from] ProfileError),
}

/// Errors related to profile dimensions and scale selection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    /// A dimension is zero, negative or not a number.
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// The page does not fit and the caller asked to keep its size.
    #[error("Page {width:.1}x{height:.1} exceeds {max_x:.1}x{max_y:.1} and must be scaled down")]
    MustScaleDown {
        width: f64,
        height: f64,
        max_x: f64,
        max_y: f64,
    },

    /// The scaled page does not fit inside the usable area.
    #[error("Dimensions {width:.1}x{height:.1} exceed {max_x:.1}x{max_y:.1}")]
    ExceedsBounds {
        width: f64,
        height: f64,
        max_x: f64,
        max_y: f64,
    },
}

/// Result type alias for device operations.
pub type DeviceResult<T> = Result<T, DeviceError>;

/// Result type alias for profile validation.
pub type ProfileResult<T> = Result<T, ProfileError>;
