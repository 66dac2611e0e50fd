//! SVG path extraction
//!
//! Reads the vector output of a page renderer and produces a [`Document`]
//! whose paths carry their root-to-leaf transform strings. Geometry is left
//! untransformed; resolution happens in [`crate::transform`].
//!
//! `<use>` references (glyph outlines kept in `<defs>`) are expanded in place,
//! with the `<use>` position folded into the chain as a translation matrix.

use std::collections::HashMap;
use std::path::Path as FsPath;
use std::str::FromStr;

use inkplot_core::{Document, Path, Point, Segment};
use roxmltree::Node;
use svgtypes::{Length, LengthUnit, SimplePathSegment, SimplifyingPathParser, ViewBox};
use tracing::{debug, info};

use crate::error::{FileFormatError, FileFormatResult};

const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// SVG to [`Document`] extractor
#[derive(Debug, Default, Clone, Copy)]
pub struct SvgExtractor;

impl SvgExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Reads and extracts an SVG file.
    pub fn from_file(&self, path: &FsPath) -> FileFormatResult<Document> {
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Err(FileFormatError::EmptyFile(path.display().to_string()));
        }
        self.extract(&content)
    }

    /// Extracts every drawable path in document order.
    pub fn extract(&self, svg: &str) -> FileFormatResult<Document> {
        if svg.trim().is_empty() {
            return Err(FileFormatError::EmptyFile("no SVG content".to_string()));
        }

        let xml = roxmltree::Document::parse(svg)
            .map_err(|e| FileFormatError::SvgParseError(e.to_string()))?;
        let root = xml.root_element();
        if root.tag_name().name() != "svg" {
            return Err(FileFormatError::SvgParseError(format!(
                "root element is <{}>, expected <svg>",
                root.tag_name().name()
            )));
        }

        let ids = id_map(&xml);
        let mut paths = Vec::new();

        for node in root.descendants().filter(|n| n.is_element()) {
            if in_defs(node) {
                continue;
            }
            match node.tag_name().name() {
                "path" => {
                    let index = paths.len();
                    let segments = parse_path_data(node.attribute("d").unwrap_or(""), index)?;
                    paths.push(Path::new(index, segments).with_transform(transform_chain(node, None)));
                }
                "use" => {
                    let Some(target) = href_id(node).and_then(|id| ids.get(id)) else {
                        debug!("Skipping <use> with unresolved reference");
                        continue;
                    };
                    let mut prefix = transform_chain(node, None);
                    if let Some(offset) = use_offset(node) {
                        push_transform(&mut prefix, &offset);
                    }
                    for referenced in referenced_paths(*target) {
                        let index = paths.len();
                        let segments =
                            parse_path_data(referenced.attribute("d").unwrap_or(""), index)?;
                        let mut chain = prefix.clone();
                        push_transform(&mut chain, &transform_chain(referenced, Some(*target)));
                        paths.push(Path::new(index, segments).with_transform(chain));
                    }
                }
                _ => {}
            }
        }

        let (width, height) = page_size(root);
        info!(
            "Extracted {} paths from SVG ({}x{} page)",
            paths.len(),
            width,
            height
        );
        Ok(Document::new(paths).with_page_size(width, height))
    }
}

/// Parses `d` data into segments.
///
/// `M` starts a new subpath without adding a segment, so multi-subpath data
/// yields a compound path. `Z` closes with a line when needed.
pub fn parse_path_data(d: &str, index: usize) -> FileFormatResult<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut current = Point::default();
    let mut subpath_start = Point::default();

    for item in SimplifyingPathParser::from(d) {
        let segment = item.map_err(|e| FileFormatError::PathData {
            index,
            reason: e.to_string(),
        })?;
        match segment {
            SimplePathSegment::MoveTo { x, y } => {
                current = Point::new(x, y);
                subpath_start = current;
            }
            SimplePathSegment::LineTo { x, y } => {
                let end = Point::new(x, y);
                segments.push(Segment::line(current, end));
                current = end;
            }
            SimplePathSegment::CurveTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                let end = Point::new(x, y);
                segments.push(Segment::cubic(
                    current,
                    Point::new(x1, y1),
                    Point::new(x2, y2),
                    end,
                ));
                current = end;
            }
            SimplePathSegment::Quadratic { x1, y1, x, y } => {
                let end = Point::new(x, y);
                segments.push(Segment::quadratic(current, Point::new(x1, y1), end));
                current = end;
            }
            SimplePathSegment::ClosePath => {
                if current != subpath_start {
                    segments.push(Segment::line(current, subpath_start));
                }
                current = subpath_start;
            }
        }
    }
    Ok(segments)
}

fn id_map<'a, 'input>(xml: &'a roxmltree::Document<'input>) -> HashMap<&'a str, Node<'a, 'input>> {
    let mut out = HashMap::new();
    for node in xml.descendants().filter(|n| n.is_element()) {
        if let Some(id) = node.attribute("id") {
            out.entry(id).or_insert(node);
        }
    }
    out
}

fn href_id<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.attribute((XLINK_NS, "href"))
        .or_else(|| node.attribute("href"))
        .and_then(|raw| raw.trim().strip_prefix('#'))
        .filter(|id| !id.is_empty())
}

fn in_defs(node: Node) -> bool {
    node.ancestors()
        .any(|a| a.is_element() && matches!(a.tag_name().name(), "defs" | "symbol" | "clipPath" | "mask"))
}

/// `transform` attributes from the root (or just below `stop`) down to `node`.
fn transform_chain(node: Node, stop: Option<Node>) -> String {
    let mut chain: Vec<&str> = Vec::new();
    for ancestor in node.ancestors().filter(|n| n.is_element()) {
        if let Some(t) = ancestor.attribute("transform") {
            chain.push(t.trim());
        }
        if Some(ancestor) == stop {
            break;
        }
    }
    chain.reverse();
    chain.join(" ")
}

fn push_transform(chain: &mut String, transform: &str) {
    if transform.is_empty() {
        return;
    }
    if !chain.is_empty() {
        chain.push(' ');
    }
    chain.push_str(transform);
}

/// The `x`/`y` placement of a `<use>` as a translation matrix
fn use_offset(node: Node) -> Option<String> {
    let coord = |name: &str| {
        node.attribute(name)
            .and_then(|v| Length::from_str(v).ok())
            .map_or(0.0, |l| l.number)
    };
    let (x, y) = (coord("x"), coord("y"));
    (x != 0.0 || y != 0.0).then(|| format!("matrix(1 0 0 1 {} {})", x, y))
}

/// The target itself when it is a `<path>`, else every `<path>` inside it.
fn referenced_paths<'a, 'input>(target: Node<'a, 'input>) -> Vec<Node<'a, 'input>> {
    if target.tag_name().name() == "path" {
        return vec![target];
    }
    target
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "path")
        .collect()
}

fn parse_dimension(value: &str) -> Option<f64> {
    Length::from_str(value)
        .ok()
        .filter(|l| l.unit != LengthUnit::Percent && l.number > 0.0)
        .map(|l| l.number)
}

/// Page size in user units: the `viewBox` extent, else `width`/`height`.
fn page_size(root: Node) -> (f64, f64) {
    if let Some(vb) = root
        .attribute("viewBox")
        .and_then(|v| ViewBox::from_str(v).ok())
    {
        return (vb.w, vb.h);
    }
    let width = root.attribute("width").and_then(parse_dimension).unwrap_or(0.0);
    let height = root.attribute("height").and_then(parse_dimension).unwrap_or(0.0);
    (width, height)
}
