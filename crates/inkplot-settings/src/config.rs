//! Toolpath configuration
//!
//! [`ToolpathConfig`] is the fully resolved configuration handed to every
//! pipeline component. It is plain data: collecting it (prompts, presets,
//! command-line flags) happens outside the pipeline.
//!
//! Supports JSON and TOML files; missing keys fall back to defaults.

use crate::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// How nested `matrix(...)` transforms on a path's ancestor chain are resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformPolicy {
    /// Use the first `matrix(...)` in the root-to-leaf string
    #[default]
    FirstMatrix,
    /// Multiply every `matrix(...)` in the string, outermost applied last
    Compose,
}

impl std::fmt::Display for TransformPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FirstMatrix => write!(f, "first_matrix"),
            Self::Compose => write!(f, "compose"),
        }
    }
}

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolpathConfig {
    /// Uniform scale, applied after normalization and filtering
    pub scale_factor: f64,
    /// Flattening resolution: each segment is sampled at `line_segments + 1` points
    pub line_segments: usize,
    /// Lift above `plot_height` for pen-up travel (mm)
    pub retraction_height: f64,
    /// Z height at which the pen touches the paper (mm)
    pub plot_height: f64,
    /// Constant Y bias added to every emitted point (mm)
    pub pen_offset_y: f64,
    /// Internal gap that splits a compound path (mm)
    pub gap_threshold: f64,
    /// Row-grouping tolerance used by the serpentine ordering (mm)
    pub y_group_threshold: f64,
    /// Paths whose bounding box is smaller than this in both axes are dropped (mm)
    pub min_path_size: f64,
    /// Split compound paths at internal gaps
    pub split_compound: bool,
    /// Feed rate for the travel move to each path start (mm/min)
    pub travel_feed_rate: u32,
    /// Feed rate for pen-down drawing moves (mm/min)
    pub draw_feed_rate: u32,
    /// Feed rate for the priming move in the header (mm/min)
    pub prime_feed_rate: u32,
    /// Machine bed extent in X (mm)
    pub bed_max_x: f64,
    /// Machine bed extent in Y (mm)
    pub bed_max_y: f64,
    /// Draw the usable-area rectangle before the artwork
    pub draw_boundary: bool,
    /// Nested transform resolution
    pub transform_policy: TransformPolicy,
}

impl Default for ToolpathConfig {
    fn default() -> Self {
        Self {
            scale_factor: 1.0,
            line_segments: 50,
            retraction_height: 20.0,
            plot_height: 63.0,
            pen_offset_y: 45.0,
            gap_threshold: 1.0,
            y_group_threshold: 5.0,
            min_path_size: 1.0,
            split_compound: false,
            travel_feed_rate: 3000,
            draw_feed_rate: 2000,
            prime_feed_rate: 1200,
            bed_max_x: 255.0,
            bed_max_y: 255.0,
            draw_boundary: false,
            transform_policy: TransformPolicy::default(),
        }
    }
}

impl ToolpathConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Z height for pen-up travel
    pub fn pen_up_height(&self) -> f64 {
        self.plot_height + self.retraction_height
    }

    /// Plot area reachable by the pen once its forward offset is accounted for
    pub fn usable_area(&self) -> (f64, f64) {
        (self.bed_max_x, self.bed_max_y - self.pen_offset_y)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match Self::extension(path)? {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded toolpath config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Self::extension(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.line_segments == 0 {
            return Err(SettingsError::invalid("line_segments", "must be at least 1"));
        }

        if !self.scale_factor.is_finite() || self.scale_factor <= 0.0 {
            return Err(SettingsError::invalid("scale_factor", "must be > 0"));
        }

        let non_negative = [
            ("retraction_height", self.retraction_height),
            ("gap_threshold", self.gap_threshold),
            ("y_group_threshold", self.y_group_threshold),
            ("min_path_size", self.min_path_size),
        ];
        for (key, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::invalid(key, "must be >= 0"));
            }
        }

        if !self.plot_height.is_finite() {
            return Err(SettingsError::invalid("plot_height", "must be finite"));
        }
        if !self.pen_offset_y.is_finite() {
            return Err(SettingsError::invalid("pen_offset_y", "must be finite"));
        }

        let feeds = [
            ("travel_feed_rate", self.travel_feed_rate),
            ("draw_feed_rate", self.draw_feed_rate),
            ("prime_feed_rate", self.prime_feed_rate),
        ];
        for (key, value) in feeds {
            if value == 0 {
                return Err(SettingsError::invalid(key, "must be > 0"));
            }
        }

        for (key, value) in [("bed_max_x", self.bed_max_x), ("bed_max_y", self.bed_max_y)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingsError::invalid(key, "bed extents must be > 0"));
            }
        }

        Ok(())
    }

    fn extension(path: &Path) -> SettingsResult<ConfigFormat> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(ConfigFormat::Json),
            Some("toml") => Ok(ConfigFormat::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

enum ConfigFormat {
    Json,
    Toml,
}

/// Default location of the user's config file (`<config dir>/inkplot/config.toml`)
pub fn default_config_path() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("inkplot").join("config.toml"))
        .ok_or_else(|| SettingsError::ConfigDirectory("no config directory on this platform".into()))
}
