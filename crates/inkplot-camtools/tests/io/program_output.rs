use inkplot_camtools::{SvgExtractor, ToolpathPipeline};
use inkplot_core::{Document, Path, Point, Segment};
use inkplot_settings::ToolpathConfig;
use regex::Regex;
use tempfile::tempdir;

fn sample_document() -> Document {
    Document::new(vec![
        Path::new(
            0,
            vec![
                Segment::line(Point::new(0.0, 0.0), Point::new(10.0, 0.0)),
                Segment::cubic(
                    Point::new(10.0, 0.0),
                    Point::new(12.0, 3.0),
                    Point::new(14.0, 3.0),
                    Point::new(16.0, 0.0),
                ),
            ],
        ),
        Path::new(1, vec![Segment::line(Point::new(0.0, 30.0), Point::new(5.0, 35.0))]),
    ])
}

#[test]
fn test_every_line_matches_output_contract() {
    let config = ToolpathConfig {
        draw_boundary: true,
        ..ToolpathConfig::default()
    };
    let output = ToolpathPipeline::new(config).unwrap().run(sample_document()).unwrap();

    let motion = Regex::new(r"^G1 X-?\d+(\.\d+)? Y-?\d+(\.\d+)?( Z-?\d+(\.\d+)?)?( E\d+(\.\d+)?)?( F\d+)?$").unwrap();
    let planar = Regex::new(r"^G1 X-?\d+\.\d{3} Y-?\d+\.\d{3} F\d+$").unwrap();
    let penlift = Regex::new(r"^G1 Z-?\d+\.\d{3} ; pen (up|down)$").unwrap();

    for line in output.program.lines() {
        let ok = line.starts_with(';')
            || line.starts_with("G28")
            || line.starts_with("G92")
            || line.starts_with("M82")
            || line.starts_with("G90")
            || line.starts_with("M84")
            || motion.is_match(line)
            || penlift.is_match(line);
        assert!(ok, "unexpected line: {}", line);
    }

    let draws = output
        .program
        .lines()
        .iter()
        .filter(|l| l.ends_with("F2000"))
        .count();
    assert!(draws > 0);
    assert!(output
        .program
        .lines()
        .iter()
        .filter(|l| l.ends_with("F2000") || l.ends_with("F3000"))
        .all(|l| planar.is_match(l)));
}

#[test]
fn test_no_adjacent_duplicates_and_sample_count() {
    let config = ToolpathConfig {
        line_segments: 10,
        ..ToolpathConfig::default()
    };
    let output = ToolpathPipeline::new(config).unwrap().run(sample_document()).unwrap();
    let lines = output.program.lines();
    assert!(lines.windows(2).all(|w| w[0] != w[1]));

    // Segment joins repeat a point; the collapse removes exactly those repeats
    let raw = output.commands.len();
    assert_eq!(raw - lines.len(), 1);
}

#[test]
fn test_pen_offset_applied_to_every_point() {
    let base = ToolpathPipeline::new(ToolpathConfig {
        pen_offset_y: 0.0,
        ..ToolpathConfig::default()
    })
    .unwrap()
    .run(sample_document())
    .unwrap();
    let shifted = ToolpathPipeline::new(ToolpathConfig {
        pen_offset_y: 45.0,
        ..ToolpathConfig::default()
    })
    .unwrap()
    .run(sample_document())
    .unwrap();

    let targets = |out: &inkplot_camtools::ToolpathOutput| -> Vec<Point> {
        out.commands.iter().filter_map(|c| c.target()).collect()
    };
    for (p, q) in targets(&base).iter().zip(targets(&shifted).iter()) {
        assert_eq!(q.x, p.x);
        assert!((q.y - p.y - 45.0).abs() < 1e-9);
    }
}

#[test]
fn test_write_program_to_file() {
    let dir = tempdir().unwrap();
    let svg_path = dir.path().join("drawing.svg");
    std::fs::write(
        &svg_path,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 50 50"><path d="M5 5 L45 5 L45 45"/></svg>"#,
    )
    .unwrap();

    let doc = SvgExtractor::new().from_file(&svg_path).unwrap();
    let output = ToolpathPipeline::new(ToolpathConfig::default()).unwrap().run(doc).unwrap();

    let out_path = dir.path().join("drawing.gcode");
    output.program.write_to(&out_path).unwrap();
    let written = std::fs::read_to_string(&out_path).unwrap();
    assert_eq!(written, output.program.to_gcode());
    assert!(!written.ends_with('\n'));
}
