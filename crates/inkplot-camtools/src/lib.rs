//! # InkPlot CAM Tools
//!
//! The geometry pipeline that turns extracted vector paths into a pen-plotter
//! G-code program.
//!
//! ## Stages
//!
//! - **Transform**: resolves each path's `matrix(...)` transform and bakes it in
//! - **Curation**: dedupe, compound split, empty and tiny path removal, normalization, scaling
//! - **Ordering**: centroid pre-sort and serpentine row ordering
//! - **G-code generation**: curve flattening and pen-up/pen-down emission
//! - **Optimizer**: adjacent duplicate collapse
//!
//! ## Supporting Infrastructure
//!
//! - **Import**: SVG extraction with a flat path → transform index
//! - **Pipeline**: runs every stage in order and collects statistics

pub mod curation;
pub mod error;
pub mod gcode_gen;
pub mod import;
pub mod optimizer;
pub mod ordering;
pub mod pipeline;
pub mod transform;

pub use curation::{dedupe_key, normalize, scale, split_path, PathCurator};
pub use error::{CamToolError, CamToolResult, FileFormatError, FileFormatResult};
pub use gcode_gen::{GcodeCommand, GcodeProgram, ToolpathEmitter};
pub use import::SvgExtractor;
pub use optimizer::GcodeOptimizer;
pub use ordering::PathOrderer;
pub use pipeline::{ToolpathOutput, ToolpathPipeline, ToolpathStats};
pub use transform::{AffineTransform, TransformIndex, TransformResolver};
