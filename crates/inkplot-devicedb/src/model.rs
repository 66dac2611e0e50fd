use inkplot_settings::ToolpathConfig;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ProfileError, ProfileResult};

/// Build volume and identity of a printer carrying the pen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrinterProfile {
    pub id: String,
    pub name: String,
    pub max_x: f64,
    pub max_y: f64,
    pub max_z: f64,
}

impl PrinterProfile {
    fn preset(id: &str, name: &str, max_x: f64, max_y: f64, max_z: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            max_x,
            max_y,
            max_z,
        }
    }

    /// A user-defined printer with a generated id
    pub fn custom(name: impl Into<String>, max_x: f64, max_y: f64, max_z: f64) -> ProfileResult<Self> {
        let profile = Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            max_x,
            max_y,
            max_z,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Built-in printer presets, in menu order
    pub fn presets() -> Vec<Self> {
        vec![
            Self::preset("a1-mini", "A1 Mini", 180.0, 180.0, 180.0),
            Self::preset("p1s-p2s", "P1S/P2S", 240.0, 255.0, 255.0),
            Self::preset("a1", "A1", 255.0, 255.0, 240.0),
            Self::preset("h2d", "H2D", 325.0, 325.0, 320.0),
        ]
    }

    pub fn validate(&self) -> ProfileResult<()> {
        for (axis, value) in [("x", self.max_x), ("y", self.max_y), ("z", self.max_z)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ProfileError::InvalidDimensions(format!(
                    "{} axis of '{}' must be > 0",
                    axis, self.name
                )));
            }
        }
        Ok(())
    }

    /// Plot area once the pen's forward offset is subtracted from Y
    pub fn usable_area(&self, pen_offset_y: f64) -> (f64, f64) {
        (self.max_x, self.max_y - pen_offset_y)
    }

    /// Copies the bed extents into a pipeline config.
    pub fn apply_to(&self, config: &mut ToolpathConfig) {
        config.bed_max_x = self.max_x;
        config.bed_max_y = self.max_y;
    }
}

impl std::fmt::Display for PrinterProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (Build volume: {}x{}x{}mm)",
            self.name, self.max_x, self.max_y, self.max_z
        )
    }
}
