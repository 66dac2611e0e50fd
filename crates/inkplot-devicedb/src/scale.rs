//! Page layout detection and scale selection against a usable plot area.
//!
//! This is the only bounds check performed on the plot: the scaled page must
//! fit inside the printer's usable area.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ProfileError, ProfileResult};

/// Orientation of the source page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageLayout {
    Portrait,
    Landscape,
}

impl PageLayout {
    /// Portrait when height >= width.
    pub fn detect(width: f64, height: f64) -> Self {
        if height >= width {
            Self::Portrait
        } else {
            Self::Landscape
        }
    }
}

impl std::fmt::Display for PageLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Portrait => write!(f, "portrait"),
            Self::Landscape => write!(f, "landscape"),
        }
    }
}

/// How the caller wants the page sized
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleRequest {
    /// Keep the page at its native size
    Keep,
    /// Scale so the page is this wide (mm)
    Width(f64),
    /// Scale so the page is this tall (mm)
    Height(f64),
    /// Use an explicit factor
    Factor(f64),
}

/// Result of a successful scale selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleSelection {
    pub factor: f64,
    pub width: f64,
    pub height: f64,
}

/// Whether a page fits the usable area without scaling
pub fn fits(width: f64, height: f64, max_x: f64, max_y: f64) -> bool {
    width <= max_x && height <= max_y
}

/// Picks a uniform scale factor for a `width` x `height` page so that it fits
/// within `max_x` x `max_y`.
pub fn select_scale(
    width: f64,
    height: f64,
    max_x: f64,
    max_y: f64,
    request: ScaleRequest,
) -> ProfileResult<ScaleSelection> {
    if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
        return Err(ProfileError::InvalidDimensions(format!(
            "page {}x{} has no area",
            width, height
        )));
    }
    if !(max_x > 0.0 && max_y > 0.0) {
        return Err(ProfileError::InvalidDimensions(format!(
            "usable area {}x{} has no area",
            max_x, max_y
        )));
    }

    let factor = match request {
        ScaleRequest::Keep => {
            if !fits(width, height, max_x, max_y) {
                return Err(ProfileError::MustScaleDown {
                    width,
                    height,
                    max_x,
                    max_y,
                });
            }
            1.0
        }
        ScaleRequest::Width(target) => positive("width", target)? / width,
        ScaleRequest::Height(target) => positive("height", target)? / height,
        ScaleRequest::Factor(factor) => positive("scale factor", factor)?,
    };

    let selection = ScaleSelection {
        factor,
        width: width * factor,
        height: height * factor,
    };

    if !fits(selection.width, selection.height, max_x, max_y) {
        return Err(ProfileError::ExceedsBounds {
            width: selection.width,
            height: selection.height,
            max_x,
            max_y,
        });
    }

    debug!(
        "Selected scale {:.4} ({:.1}x{:.1}mm)",
        selection.factor, selection.width, selection.height
    );
    Ok(selection)
}

fn positive(name: &str, value: f64) -> ProfileResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ProfileError::InvalidDimensions(format!(
            "{} must be > 0, got {}",
            name, value
        )))
    }
}
