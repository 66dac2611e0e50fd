//! InkPlot Settings Crate
//!
//! Handles toolpath configuration, validation and persistence.

pub mod config;
pub mod error;

pub use config::{default_config_path, ToolpathConfig, TransformPolicy};
pub use error::{SettingsError, SettingsResult};
