use inkplot_camtools::{dedupe_key, normalize, split_path, PathCurator};
use inkplot_core::{Document, Path, Point, Segment};
use inkplot_settings::ToolpathConfig;

fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> Segment {
    Segment::line(Point::new(x0, y0), Point::new(x1, y1))
}

fn curator(config: ToolpathConfig) -> PathCurator {
    PathCurator::new(&config)
}

#[test]
fn test_dedupe_keeps_lowest_index() {
    let doc = Document::new(vec![
        Path::new(0, vec![line(3.0, 3.0, 4.0, 4.0)]),
        Path::new(1, vec![line(0.0, 0.0, 1.0, 1.0)]),
        Path::new(2, vec![line(0.0, 0.0, 1.0, 1.0)]),
        Path::new(3, vec![line(3.0, 3.0, 4.0, 4.0)]),
    ]);
    let out = curator(ToolpathConfig::default()).dedupe(doc);
    let kept: Vec<usize> = out.paths.iter().map(|p| p.index).collect();
    assert_eq!(kept, vec![0, 1]);
}

#[test]
fn test_dedupe_ignores_control_points() {
    // Same endpoints, different handles: still duplicates
    let a = Segment::cubic(
        Point::new(0.0, 0.0),
        Point::new(1.0, 5.0),
        Point::new(2.0, 5.0),
        Point::new(3.0, 0.0),
    );
    let b = Segment::cubic(
        Point::new(0.0, 0.0),
        Point::new(1.0, -5.0),
        Point::new(2.0, -5.0),
        Point::new(3.0, 0.0),
    );
    assert_eq!(
        dedupe_key(&Path::new(0, vec![a])),
        dedupe_key(&Path::new(1, vec![b]))
    );
}

#[test]
fn test_dedupe_distinguishes_segment_count() {
    let one = Path::new(0, vec![line(0.0, 0.0, 2.0, 0.0)]);
    let two = Path::new(1, vec![line(0.0, 0.0, 2.0, 0.0), line(2.0, 0.0, 2.0, 0.0)]);
    assert_ne!(dedupe_key(&one), dedupe_key(&two));
}

#[test]
fn test_split_replaces_path_in_place() {
    let config = ToolpathConfig {
        split_compound: true,
        gap_threshold: 1.0,
        ..ToolpathConfig::default()
    };
    let doc = Document::new(vec![
        Path::new(0, vec![line(0.0, 0.0, 1.0, 0.0)]),
        Path::new(1, vec![line(0.0, 5.0, 1.0, 5.0), line(3.0, 5.0, 4.0, 5.0)]),
        Path::new(2, vec![line(0.0, 9.0, 1.0, 9.0)]),
    ]);
    let out = curator(config).split(doc);
    let indices: Vec<usize> = out.paths.iter().map(|p| p.index).collect();
    assert_eq!(indices, vec![0, 1, 1, 2]);
}

#[test]
fn test_gap_equal_to_threshold_does_not_split() {
    let path = Path::new(0, vec![line(0.0, 0.0, 1.0, 0.0), line(2.0, 0.0, 3.0, 0.0)]);
    assert_eq!(split_path(&path, 1.0).len(), 1);
    assert_eq!(split_path(&path, 0.99).len(), 2);
}

#[test]
fn test_tiny_filter_half_millimeter() {
    let config = ToolpathConfig {
        min_path_size: 1.0,
        ..ToolpathConfig::default()
    };
    let doc = Document::new(vec![
        Path::new(0, vec![line(0.0, 0.0, 0.5, 0.0)]),
        Path::new(1, vec![line(0.0, 0.0, 0.5, 0.5)]),
        Path::new(2, vec![line(0.0, 0.0, 1.0, 0.5)]),
    ]);
    let out = curator(config).filter_tiny(doc);
    assert_eq!(out.len(), 1);
    assert_eq!(out.paths[0].index, 2);
}

#[test]
fn test_curate_never_adds_segments() {
    let config = ToolpathConfig {
        split_compound: true,
        ..ToolpathConfig::default()
    };
    let doc = Document::new(vec![
        Path::new(0, vec![line(0.0, 0.0, 1.0, 0.0), line(5.0, 0.0, 6.0, 0.0)]),
        Path::new(1, Vec::new()),
        Path::new(2, vec![line(0.0, 0.0, 1.0, 0.0), line(5.0, 0.0, 6.0, 0.0)]),
    ]);
    let before = doc.segment_count();
    let out = curator(config).curate(doc);
    assert!(out.segment_count() <= before);
    assert_eq!(out.len(), 2);
    assert!(out.paths.iter().all(|p| !p.is_empty()));
}

#[test]
fn test_normalize_is_idempotent() {
    let doc = Document::new(vec![Path::new(0, vec![line(-3.0, 7.0, 12.0, 9.5)])]);
    let once = normalize(doc).unwrap();
    let twice = normalize(once.clone()).unwrap();
    assert_eq!(once, twice);
}
