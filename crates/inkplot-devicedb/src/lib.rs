//! # InkPlot Device Database
//!
//! Printer profiles (build volumes), the usable plot area once the pen's
//! forward offset is taken into account, and scale selection for a source page.

pub mod error;
pub mod manager;
pub mod model;
pub mod scale;

pub use error::{DeviceError, DeviceResult, ProfileError, ProfileResult};
pub use manager::ProfileRegistry;
pub use model::PrinterProfile;
pub use scale::{fits, select_scale, PageLayout, ScaleRequest, ScaleSelection};
