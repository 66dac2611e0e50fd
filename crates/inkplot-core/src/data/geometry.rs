//! Planar geometry primitives: points, segments and bounding boxes.

use lyon::geom::{CubicBezierSegment, LineSegment};
use serde::{Deserialize, Serialize};

/// Flattening tolerance used when measuring curve length (mm)
const LENGTH_TOLERANCE: f64 = 1e-3;

/// A 2D coordinate in document units (millimeters once scaled).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point with the given X and Y coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Returns this point shifted by (dx, dy).
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Returns this point multiplied by a uniform factor about the origin.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    fn to_lyon(self) -> lyon::geom::Point<f64> {
        lyon::geom::Point::new(self.x, self.y)
    }

    fn from_lyon(p: lyon::geom::Point<f64>) -> Self {
        Self::new(p.x, p.y)
    }
}

/// A drawable piece of a path: a straight line or a cubic Bézier curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Segment {
    Line {
        start: Point,
        end: Point,
    },
    Cubic {
        start: Point,
        control1: Point,
        control2: Point,
        end: Point,
    },
}

impl Segment {
    /// Creates a straight segment.
    pub fn line(start: Point, end: Point) -> Self {
        Self::Line { start, end }
    }

    /// Creates a cubic Bézier segment.
    pub fn cubic(start: Point, control1: Point, control2: Point, end: Point) -> Self {
        Self::Cubic {
            start,
            control1,
            control2,
            end,
        }
    }

    /// Degree-elevates a quadratic Bézier into the equivalent cubic.
    pub fn quadratic(start: Point, control: Point, end: Point) -> Self {
        let c1 = Point::new(
            start.x + 2.0 / 3.0 * (control.x - start.x),
            start.y + 2.0 / 3.0 * (control.y - start.y),
        );
        let c2 = Point::new(
            end.x + 2.0 / 3.0 * (control.x - end.x),
            end.y + 2.0 / 3.0 * (control.y - end.y),
        );
        Self::cubic(start, c1, c2, end)
    }

    pub fn start(&self) -> Point {
        match self {
            Self::Line { start, .. } | Self::Cubic { start, .. } => *start,
        }
    }

    pub fn end(&self) -> Point {
        match self {
            Self::Line { end, .. } | Self::Cubic { end, .. } => *end,
        }
    }

    pub fn is_curve(&self) -> bool {
        matches!(self, Self::Cubic { .. })
    }

    /// Evaluates the segment at parameter `t` in [0, 1].
    pub fn point_at(&self, t: f64) -> Point {
        match *self {
            Self::Line { start, end } => Point::from_lyon(
                LineSegment {
                    from: start.to_lyon(),
                    to: end.to_lyon(),
                }
                .sample(t),
            ),
            Self::Cubic { .. } => Point::from_lyon(self.to_lyon_cubic().sample(t)),
        }
    }

    /// Cartesian length of the drawn segment.
    pub fn length(&self) -> f64 {
        match *self {
            Self::Line { start, end } => start.distance_to(&end),
            Self::Cubic { .. } => self.to_lyon_cubic().approximate_length(LENGTH_TOLERANCE),
        }
    }

    /// Samples `divisions + 1` evenly spaced parameters over [0, 1], both ends included.
    pub fn sample(&self, divisions: usize) -> Vec<Point> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| self.point_at(i as f64 / divisions as f64))
            .collect()
    }

    /// Applies `f` to every point of the segment, control points included.
    pub fn map_points(&self, f: impl Fn(Point) -> Point) -> Self {
        match *self {
            Self::Line { start, end } => Self::line(f(start), f(end)),
            Self::Cubic {
                start,
                control1,
                control2,
                end,
            } => Self::cubic(f(start), f(control1), f(control2), f(end)),
        }
    }

    fn to_lyon_cubic(self) -> CubicBezierSegment<f64> {
        match self {
            Self::Line { start, end } => CubicBezierSegment {
                from: start.to_lyon(),
                ctrl1: start.to_lyon(),
                ctrl2: end.to_lyon(),
                to: end.to_lyon(),
            },
            Self::Cubic {
                start,
                control1,
                control2,
                end,
            } => CubicBezierSegment {
                from: start.to_lyon(),
                ctrl1: control1.to_lyon(),
                ctrl2: control2.to_lyon(),
                to: end.to_lyon(),
            },
        }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Smallest box containing every point, or `None` for an empty iterator
    /// or any non-finite coordinate.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bbox = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in iter {
            if !(p.x.is_finite() && p.y.is_finite()) {
                return None;
            }
            bbox.include(p);
        }
        bbox.is_finite().then_some(bbox)
    }

    /// Grows the box to contain `p`.
    pub fn include(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// The larger of width and height.
    pub fn max_dimension(&self) -> f64 {
        self.width().max(self.height())
    }

    pub fn min(&self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    fn is_finite(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
    }
}
