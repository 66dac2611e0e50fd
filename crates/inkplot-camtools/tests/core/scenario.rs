use inkplot_camtools::{GcodeCommand, ToolpathPipeline};
use inkplot_core::{Document, Path, Point, Segment};
use inkplot_settings::ToolpathConfig;

/// Vertical 2mm line centred on (x, y)
fn bar(index: usize, x: f64, y: f64) -> Path {
    Path::new(
        index,
        vec![Segment::line(Point::new(x, y - 1.0), Point::new(x, y + 1.0))],
    )
}

fn three_paths() -> Document {
    Document::new(vec![bar(0, 10.0, 0.0), bar(1, 0.0, 5.0), bar(2, 0.0, 100.0)])
}

fn config() -> ToolpathConfig {
    ToolpathConfig {
        y_group_threshold: 5.0,
        min_path_size: 1.0,
        pen_offset_y: 0.0,
        line_segments: 4,
        ..ToolpathConfig::default()
    }
}

#[test]
fn test_rows_for_three_paths() {
    let pipeline = ToolpathPipeline::new(config()).unwrap();
    let (doc, stats) = pipeline.prepare(three_paths()).unwrap();
    assert_eq!(stats.rows, 2);

    // Top row holds the y=100 path alone; y=5 and y=0 share the second row,
    // which is odd and therefore visited right to left.
    let order: Vec<usize> = doc.paths.iter().map(|p| p.index).collect();
    assert_eq!(order, vec![2, 0, 1]);
}

#[test]
fn test_half_millimeter_path_is_dropped() {
    let mut doc = three_paths();
    doc.paths.push(Path::new(
        3,
        vec![Segment::line(Point::new(50.0, 50.0), Point::new(50.5, 50.0))],
    ));
    let pipeline = ToolpathPipeline::new(config()).unwrap();
    let (out, stats) = pipeline.prepare(doc).unwrap();
    assert_eq!(stats.tiny_removed, 1);
    assert!(out.paths.iter().all(|p| p.index != 3));
}

#[test]
fn test_scale_two_doubles_every_coordinate() {
    let unscaled = ToolpathPipeline::new(config()).unwrap().run(three_paths()).unwrap();
    let doubled = ToolpathPipeline::new(ToolpathConfig {
        scale_factor: 2.0,
        ..config()
    })
    .unwrap()
    .run(three_paths())
    .unwrap();

    let targets = |commands: &[GcodeCommand]| -> Vec<Point> {
        commands.iter().filter_map(GcodeCommand::target).collect()
    };
    let a = targets(&unscaled.commands);
    let b = targets(&doubled.commands);
    assert_eq!(a.len(), b.len());
    assert!(!a.is_empty());
    for (p, q) in a.iter().zip(&b) {
        assert_eq!(q.x, p.x * 2.0);
        assert_eq!(q.y, p.y * 2.0);
    }
}

#[test]
fn test_scale_is_applied_after_tiny_filter() {
    // 0.8mm before scaling, 1.6mm after; the filter sees the unscaled size
    let mut doc = three_paths();
    doc.paths.push(Path::new(
        3,
        vec![Segment::line(Point::new(60.0, 60.0), Point::new(60.8, 60.0))],
    ));
    let pipeline = ToolpathPipeline::new(ToolpathConfig {
        scale_factor: 2.0,
        ..config()
    })
    .unwrap();
    let (_, stats) = pipeline.prepare(doc).unwrap();
    assert_eq!(stats.tiny_removed, 1);
}
