//! Path curation
//!
//! Filters and partitions applied to a transformed document before ordering:
//! dedupe, optional compound split, empty-path drop and the tiny-path
//! filter. None of these can fail. Normalization and scaling also live here
//! since they share the same "total function over a document" shape.

use std::collections::HashSet;

use inkplot_core::{Document, Path, ToolpathError, ToolpathResult};
use inkplot_settings::ToolpathConfig;
use tracing::debug;

/// Rounded segment endpoints `(x0, y0, x1, y1)` in units of 1e-4
pub type EndpointKey = (i64, i64, i64, i64);

fn round4(v: f64) -> i64 {
    (v * 1e4).round() as i64
}

/// Dedupe key: each segment's start and end rounded to 4 decimals, in order.
pub fn dedupe_key(path: &Path) -> Vec<EndpointKey> {
    path.segments
        .iter()
        .map(|s| {
            let (a, b) = (s.start(), s.end());
            (round4(a.x), round4(a.y), round4(b.x), round4(b.y))
        })
        .collect()
}

/// Cuts `path` wherever the gap between consecutive segments exceeds
/// `threshold`. Siblings keep the original index and carry no transform.
pub fn split_path(path: &Path, threshold: f64) -> Vec<Path> {
    let gaps = path.gaps(threshold);
    if gaps.is_empty() {
        return vec![path.clone()];
    }

    let mut pieces = Vec::with_capacity(gaps.len() + 1);
    let mut start = 0;
    for cut in gaps.into_iter().map(|i| i + 1).chain([path.len()]) {
        pieces.push(Path::new(path.index, path.segments[start..cut].to_vec()));
        start = cut;
    }
    pieces
}

/// Curation stages configured from a [`ToolpathConfig`]
#[derive(Debug, Clone)]
pub struct PathCurator {
    gap_threshold: f64,
    min_path_size: f64,
    split_compound: bool,
}

impl PathCurator {
    pub fn new(config: &ToolpathConfig) -> Self {
        Self {
            gap_threshold: config.gap_threshold,
            min_path_size: config.min_path_size,
            split_compound: config.split_compound,
        }
    }

    /// Keeps the first path for each dedupe key, preserving order.
    pub fn dedupe(&self, document: Document) -> Document {
        let mut seen: HashSet<Vec<EndpointKey>> = HashSet::new();
        let before = document.len();
        let paths: Vec<Path> = document
            .paths
            .iter()
            .filter(|p| seen.insert(dedupe_key(p)))
            .cloned()
            .collect();
        debug!("Dedupe removed {} paths", before - paths.len());
        document.with_paths(paths)
    }

    /// Splits compound paths in place when enabled; otherwise a no-op.
    pub fn split(&self, document: Document) -> Document {
        if !self.split_compound {
            return document;
        }
        let before = document.len();
        let paths: Vec<Path> = document
            .paths
            .iter()
            .flat_map(|p| split_path(p, self.gap_threshold))
            .collect();
        debug!("Compound split produced {} extra paths", paths.len() - before);
        document.with_paths(paths)
    }

    /// Drops paths with no segments.
    pub fn drop_empty(&self, document: Document) -> Document {
        let paths: Vec<Path> = document
            .paths
            .iter()
            .filter(|p| !p.is_empty())
            .cloned()
            .collect();
        document.with_paths(paths)
    }

    /// Dedupe, optional split, then empty-path drop.
    pub fn curate(&self, document: Document) -> Document {
        let document = self.dedupe(document);
        let document = self.split(document);
        self.drop_empty(document)
    }

    /// Whether a path's endpoint bounding box is below `min_path_size` in
    /// its larger dimension. Paths with no bounds count as tiny.
    pub fn is_tiny(&self, path: &Path) -> bool {
        path.bounding_box()
            .map_or(true, |bbox| bbox.max_dimension() < self.min_path_size)
    }

    /// Drops paths whose larger bounding-box dimension is below `min_path_size`.
    pub fn filter_tiny(&self, document: Document) -> Document {
        let before = document.len();
        let paths: Vec<Path> = document
            .paths
            .iter()
            .filter(|p| !self.is_tiny(p))
            .cloned()
            .collect();
        debug!("Tiny-path filter removed {} paths", before - paths.len());
        document.with_paths(paths)
    }
}

/// Translates the document so the minimum endpoint x and y are both zero.
pub fn normalize(document: Document) -> ToolpathResult<Document> {
    let bbox = document
        .bounding_box()
        .ok_or_else(|| ToolpathError::empty("cannot compute bounds of an empty document"))?;
    let (dx, dy) = (-bbox.min_x, -bbox.min_y);
    if dx == 0.0 && dy == 0.0 {
        return Ok(document);
    }
    Ok(document.map_points(|p| p.translated(dx, dy)))
}

/// Multiplies every point by `factor` about the origin.
pub fn scale(document: Document, factor: f64) -> Document {
    if factor == 1.0 {
        return document;
    }
    document.map_points(|p| p.scaled(factor))
}
