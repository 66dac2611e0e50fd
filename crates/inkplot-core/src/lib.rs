//! # InkPlot Core
//!
//! Core types and error handling for InkPlot.
//! Provides the geometry data model (points, segments, paths, documents)
//! shared by every stage of the vector-to-G-code pipeline.

pub mod data;
pub mod error;

pub use data::{BoundingBox, Document, Path, Point, Segment};
pub use error::{Error, Result, ToolpathError, ToolpathResult};
