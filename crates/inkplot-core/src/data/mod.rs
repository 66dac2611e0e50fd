//! Data models for the plotting pipeline
//!
//! A [`Document`] is built once from extracted geometry, threaded by value
//! through every pipeline stage, and consumed by the emitter.

mod geometry;
mod path;

pub use geometry::{BoundingBox, Point, Segment};
pub use path::Path;

use serde::{Deserialize, Serialize};

/// An ordered collection of paths plus the source page size.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    pub paths: Vec<Path>,
    /// Width of the source page in document units
    #[serde(default)]
    pub page_width: f64,
    /// Height of the source page in document units
    #[serde(default)]
    pub page_height: f64,
}

impl Document {
    /// Creates a document from paths, with no page size.
    pub fn new(paths: Vec<Path>) -> Self {
        Self {
            paths,
            page_width: 0.0,
            page_height: 0.0,
        }
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, width: f64, height: f64) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Total segment count across all paths.
    pub fn segment_count(&self) -> usize {
        self.paths.iter().map(Path::len).sum()
    }

    /// Bounding box over every segment endpoint in the document.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.paths.iter().flat_map(Path::endpoints))
    }

    /// Replaces the path list, keeping page metadata.
    pub fn with_paths(self, paths: Vec<Path>) -> Self {
        Self { paths, ..self }
    }

    /// Applies `f` to every point in the document.
    pub fn map_points(self, f: impl Fn(Point) -> Point) -> Self {
        let paths = self.paths.iter().map(|p| p.map_points(&f)).collect();
        self.with_paths(paths)
    }
}
