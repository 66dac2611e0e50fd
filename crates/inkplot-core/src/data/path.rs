//! Paths: ordered runs of segments extracted from the source document.

use super::geometry::{BoundingBox, Point, Segment};
use serde::{Deserialize, Serialize};

/// An ordered sequence of segments drawn in one pen-down stroke (or several,
/// for a compound path).
///
/// `index` is the path's position in the source document. It is used to look
/// up the path's transform and as the stable tie-break when ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub index: usize,
    pub segments: Vec<Segment>,
    /// Root-to-leaf transform attributes captured at extraction time.
    #[serde(default)]
    pub transform: String,
}

impl Path {
    /// Creates a path with no transform.
    pub fn new(index: usize, segments: Vec<Segment>) -> Self {
        Self {
            index,
            segments,
            transform: String::new(),
        }
    }

    /// Attaches the captured transform string.
    pub fn with_transform(mut self, transform: impl Into<String>) -> Self {
        self.transform = transform.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Start and end of every segment, in order. Control points are excluded.
    pub fn endpoints(&self) -> impl Iterator<Item = Point> + '_ {
        self.segments.iter().flat_map(|s| [s.start(), s.end()])
    }

    /// Bounding box over segment endpoints.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.endpoints())
    }

    /// Arithmetic mean of all segment endpoints, or `None` for an empty path.
    pub fn centroid(&self) -> Option<Point> {
        let (mut sx, mut sy, mut n) = (0.0, 0.0, 0usize);
        for p in self.endpoints() {
            sx += p.x;
            sy += p.y;
            n += 1;
        }
        (n > 0).then(|| Point::new(sx / n as f64, sy / n as f64))
    }

    /// Indices `i` where the gap between segment `i`'s end and segment
    /// `i + 1`'s start exceeds `threshold`.
    pub fn gaps(&self, threshold: f64) -> Vec<usize> {
        self.segments
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| pair[0].end().distance_to(&pair[1].start()) > threshold)
            .map(|(i, _)| i)
            .collect()
    }

    /// Whether the path contains at least one internal gap above `threshold`.
    pub fn is_compound(&self, threshold: f64) -> bool {
        !self.gaps(threshold).is_empty()
    }

    /// Sum of segment lengths.
    pub fn length(&self) -> f64 {
        self.segments.iter().map(Segment::length).sum()
    }

    pub fn start(&self) -> Option<Point> {
        self.segments.first().map(Segment::start)
    }

    pub fn end(&self) -> Option<Point> {
        self.segments.last().map(Segment::end)
    }

    /// Applies `f` to every point of every segment.
    pub fn map_points(&self, f: impl Fn(Point) -> Point) -> Self {
        Self {
            index: self.index,
            segments: self.segments.iter().map(|s| s.map_points(&f)).collect(),
            transform: self.transform.clone(),
        }
    }
}
