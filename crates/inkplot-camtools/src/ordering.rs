//! Path ordering
//!
//! Two independent orders are computed over path centroids:
//! - a coarse pre-sort, (y, x) ascending, used before normalization to fix a
//!   deterministic base order;
//! - the serpentine visiting order used for emission: rows from the top of
//!   the document down, alternating left-to-right and right-to-left.
//!
//! Rows are grouped with a running "last seen y": a path joins the current
//! row when its centroid y is within `y_group_threshold` of the previous
//! path's, so one row may drift well past the threshold overall.

use std::cmp::Ordering;

use inkplot_core::{Document, Path, Point};
use inkplot_settings::ToolpathConfig;
use tracing::{debug, warn};

/// Serpentine path orderer
#[derive(Debug, Clone)]
pub struct PathOrderer {
    y_group_threshold: f64,
}

impl PathOrderer {
    pub fn new(config: &ToolpathConfig) -> Self {
        Self::with_threshold(config.y_group_threshold)
    }

    pub fn with_threshold(y_group_threshold: f64) -> Self {
        Self { y_group_threshold }
    }

    /// Sorts paths by centroid (y, x) ascending. Paths without a centroid go
    /// last; ties keep their input order.
    pub fn presort(document: Document) -> Document {
        let mut keyed: Vec<(Option<Point>, Path)> = document
            .paths
            .iter()
            .map(|p| (p.centroid(), p.clone()))
            .collect();
        keyed.sort_by(|(a, _), (b, _)| match (a, b) {
            (Some(a), Some(b)) => a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        document.with_paths(keyed.into_iter().map(|(_, p)| p).collect())
    }

    /// Groups positions into rows, top row first.
    ///
    /// Returns positions into `paths`. Paths without a centroid are left out.
    pub fn row_groups(&self, paths: &[Path]) -> Vec<Vec<usize>> {
        let mut centered: Vec<(usize, Point)> = Vec::with_capacity(paths.len());
        for (pos, path) in paths.iter().enumerate() {
            match path.centroid() {
                Some(c) => centered.push((pos, c)),
                None => warn!("Path {} has no endpoints, leaving it out of the order", path.index),
            }
        }
        centered.sort_by(|(_, a), (_, b)| b.y.total_cmp(&a.y));

        let mut rows: Vec<Vec<(usize, Point)>> = Vec::new();
        let mut last_y: Option<f64> = None;
        for (pos, c) in centered {
            let joins_row = last_y.is_some_and(|y| (c.y - y).abs() <= self.y_group_threshold);
            match rows.last_mut() {
                Some(row) if joins_row => row.push((pos, c)),
                _ => rows.push(vec![(pos, c)]),
            }
            last_y = Some(c.y);
        }

        rows.into_iter()
            .enumerate()
            .map(|(row_index, mut row)| {
                if row_index % 2 == 0 {
                    row.sort_by(|(_, a), (_, b)| a.x.total_cmp(&b.x));
                } else {
                    row.sort_by(|(_, a), (_, b)| b.x.total_cmp(&a.x));
                }
                row.into_iter().map(|(pos, _)| pos).collect()
            })
            .collect()
    }

    /// Serpentine visiting order as positions into `paths`.
    pub fn visiting_order(&self, paths: &[Path]) -> Vec<usize> {
        self.row_groups(paths).into_iter().flatten().collect()
    }

    /// Reorders the document into visiting order and returns the row count.
    pub fn order(&self, document: Document) -> (Document, usize) {
        let rows = self.row_groups(&document.paths);
        let row_count = rows.len();
        let paths: Vec<Path> = rows
            .into_iter()
            .flatten()
            .map(|pos| document.paths[pos].clone())
            .collect();
        debug!("Ordered {} paths into {} rows", paths.len(), row_count);
        (document.with_paths(paths), row_count)
    }
}
