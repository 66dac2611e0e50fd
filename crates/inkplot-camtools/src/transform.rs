//! Transform resolution
//!
//! Every path carries the `transform` attributes of its ancestors and itself,
//! joined root-to-leaf at extraction time. [`TransformResolver`] turns that
//! string into a single affine transform and bakes it into the geometry so
//! later stages (dedupe, tiny filter) see final shapes.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use inkplot_core::{Document, Path, Point, ToolpathError, ToolpathResult};
use inkplot_settings::TransformPolicy;
use lyon::geom::Transform;
use regex::Regex;
use tracing::{debug, warn};

static MATRIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"matrix\s*\(([^)]*)\)").expect("invalid matrix regex"));

/// Flat map from path index to its root-to-leaf transform string
pub type TransformIndex = BTreeMap<usize, String>;

/// Affine transform `(a, b, c, d, e, f)`:
/// `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl AffineTransform {
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Applies the transform to a point.
    pub fn apply(&self, p: Point) -> Point {
        let out = self
            .to_lyon()
            .transform_point(lyon::geom::point(p.x, p.y));
        Point::new(out.x, out.y)
    }

    /// Transform that applies `self` first, then `outer`.
    pub fn then(&self, outer: &AffineTransform) -> Self {
        Self::from_lyon(self.to_lyon().then(&outer.to_lyon()))
    }

    fn to_lyon(self) -> Transform<f64> {
        Transform::new(self.a, self.b, self.c, self.d, self.e, self.f)
    }

    fn from_lyon(t: Transform<f64>) -> Self {
        Self::new(t.m11, t.m12, t.m21, t.m22, t.m31, t.m32)
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Parses every `matrix(...)` in `transform`, in string order.
///
/// Tokens are separated by commas and/or whitespace. A token that is not a
/// number, or a matrix without exactly six values, is a parse error naming
/// `path_index`.
pub fn parse_matrices(transform: &str, path_index: usize) -> ToolpathResult<Vec<AffineTransform>> {
    MATRIX_RE
        .captures_iter(transform)
        .map(|caps| parse_matrix_body(&caps[1], path_index))
        .collect()
}

fn parse_matrix_body(body: &str, path_index: usize) -> ToolpathResult<AffineTransform> {
    let values = body
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| {
                    ToolpathError::parse(path_index, format!("invalid number '{}' in matrix", token))
                })
        })
        .collect::<ToolpathResult<Vec<f64>>>()?;

    match values.as_slice() {
        &[a, b, c, d, e, f] => Ok(AffineTransform::new(a, b, c, d, e, f)),
        _ => Err(ToolpathError::parse(
            path_index,
            format!("matrix needs 6 values, found {}", values.len()),
        )),
    }
}

/// Resolves and applies per-path transforms.
#[derive(Debug, Clone)]
pub struct TransformResolver {
    index: TransformIndex,
    policy: TransformPolicy,
}

impl TransformResolver {
    /// Resolver over an explicit path-index → transform-string map
    pub fn new(index: TransformIndex, policy: TransformPolicy) -> Self {
        Self { index, policy }
    }

    /// Builds the index from the transform strings captured on each path
    pub fn from_paths(paths: &[Path], policy: TransformPolicy) -> Self {
        let index = paths
            .iter()
            .map(|p| (p.index, p.transform.clone()))
            .collect();
        Self::new(index, policy)
    }

    /// Effective transform for the path at `path_index`.
    ///
    /// An index with no entry resolves to the identity transform.
    pub fn resolve(&self, path_index: usize) -> ToolpathResult<AffineTransform> {
        let Some(transform) = self.index.get(&path_index) else {
            warn!("No transform entry for path {}, using identity", path_index);
            return Ok(AffineTransform::IDENTITY);
        };

        let matrices: Vec<AffineTransform> = match self.policy {
            TransformPolicy::FirstMatrix => MATRIX_RE
                .captures(transform)
                .map(|caps| parse_matrix_body(&caps[1], path_index))
                .transpose()?
                .into_iter()
                .collect(),
            TransformPolicy::Compose => parse_matrices(transform, path_index)?,
        };

        if matrices.is_empty() && !transform.trim().is_empty() {
            warn!(
                "Ignoring non-matrix transform '{}' on path {}",
                transform.trim(),
                path_index
            );
        }

        // Leaf-most matrix is applied first
        Ok(matrices
            .iter()
            .rev()
            .fold(AffineTransform::IDENTITY, |acc, m| acc.then(m)))
    }

    /// Applies the resolved transform to every point of a path and clears its
    /// transform string.
    pub fn apply_to_path(&self, path: &Path) -> ToolpathResult<Path> {
        let transform = self.resolve(path.index)?;
        let mut resolved = if transform.is_identity() {
            path.clone()
        } else {
            path.map_points(|p| transform.apply(p))
        };
        resolved.transform.clear();
        Ok(resolved)
    }

    /// Applies transforms to every path of the document.
    pub fn apply(&self, document: Document) -> ToolpathResult<Document> {
        let paths = document
            .paths
            .iter()
            .map(|p| self.apply_to_path(p))
            .collect::<ToolpathResult<Vec<_>>>()?;
        debug!("Resolved transforms for {} paths", paths.len());
        Ok(document.with_paths(paths))
    }
}
