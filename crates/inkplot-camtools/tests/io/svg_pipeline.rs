use inkplot_camtools::{CamToolError, SvgExtractor, ToolpathPipeline};
use inkplot_core::ToolpathError;
use inkplot_settings::{ToolpathConfig, TransformPolicy};

const DRAWING: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="100pt" height="80pt" viewBox="0 0 100 80">
  <g transform="matrix(1,0,0,1,10,10)">
    <path d="M0 0 L20 0 L20 20 L0 20 Z"/>
    <path d="M0 0 L20 0 L20 20 L0 20 Z"/>
    <path d="M40 0 C45 10 55 10 60 0"/>
  </g>
  <path d="M0 60 L0.3 60"/>
</svg>"#;

#[test]
fn test_svg_to_program() {
    let doc = SvgExtractor::new().extract(DRAWING).unwrap();
    assert_eq!(doc.len(), 4);
    assert_eq!((doc.page_width, doc.page_height), (100.0, 80.0));

    let pipeline = ToolpathPipeline::new(ToolpathConfig::default()).unwrap();
    let output = pipeline.run(doc).unwrap();

    assert_eq!(output.stats.input_paths, 4);
    assert_eq!(output.stats.duplicates_removed, 1);
    assert_eq!(output.stats.tiny_removed, 1);
    assert_eq!(output.stats.final_paths, 2);

    let gcode = output.program.to_gcode();
    assert!(gcode.starts_with("; ------------Initial Sequence------------\nG28"));
    assert!(gcode.ends_with("M84            ;Disable Motors\n; ------------End Sequence------------"));
    assert_eq!(gcode.matches("; pen down").count(), 2);
}

#[test]
fn test_transform_is_baked_before_normalization() {
    // A single path moved by its group matrix normalizes back to the origin
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
      <g transform="matrix(2 0 0 2 30 40)"><path d="M1 1 L6 1"/></g>
    </svg>"#;
    let doc = SvgExtractor::new().extract(svg).unwrap();
    let pipeline = ToolpathPipeline::new(ToolpathConfig::default()).unwrap();
    let (out, _) = pipeline.prepare(doc).unwrap();
    let bbox = out.bounding_box().unwrap();
    assert_eq!((bbox.min_x, bbox.min_y), (0.0, 0.0));
    assert_eq!(bbox.width(), 10.0);
}

#[test]
fn test_malformed_matrix_reports_path_index() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
      <path d="M0 0 L10 0"/>
      <g transform="matrix(1,0,0,1,five,0)"><path d="M0 5 L10 5"/></g>
    </svg>"#;
    let doc = SvgExtractor::new().extract(svg).unwrap();
    let pipeline = ToolpathPipeline::new(ToolpathConfig::default()).unwrap();
    match pipeline.run(doc) {
        Err(CamToolError::Toolpath(ToolpathError::Parse { path_index, .. })) => {
            assert_eq!(path_index, 1)
        }
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_compose_policy_differs_from_first_matrix() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
      <path d="M0 0 L1 0"/>
      <g transform="matrix(3,0,0,3,0,0)">
        <g transform="matrix(1,0,0,1,2,0)"><path d="M0 0 L1 0"/></g>
      </g>
    </svg>"#;
    let doc = SvgExtractor::new().extract(svg).unwrap();
    let compose = ToolpathPipeline::new(ToolpathConfig {
        transform_policy: TransformPolicy::Compose,
        min_path_size: 0.0,
        ..ToolpathConfig::default()
    })
    .unwrap();
    // translate by 2, then scale by 3: x spans 6..9
    let (out, _) = compose.prepare(doc.clone()).unwrap();
    assert_eq!(out.bounding_box().unwrap().width(), 9.0);

    let first = ToolpathPipeline::new(ToolpathConfig {
        min_path_size: 0.0,
        ..ToolpathConfig::default()
    })
    .unwrap();
    // only the outer scale applies: x spans 0..3
    let (out, _) = first.prepare(doc).unwrap();
    assert_eq!(out.bounding_box().unwrap().width(), 3.0);
}

#[test]
fn test_split_compound_from_multi_subpath_data() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
      <path d="M0 0 L10 0 M0 20 L10 20 M0 40 L10 40"/>
    </svg>"#;
    let doc = SvgExtractor::new().extract(svg).unwrap();
    let pipeline = ToolpathPipeline::new(ToolpathConfig {
        split_compound: true,
        ..ToolpathConfig::default()
    })
    .unwrap();
    let output = pipeline.run(doc).unwrap();
    assert_eq!(output.stats.paths_split, 2);
    assert_eq!(output.stats.final_paths, 3);
    assert_eq!(output.stats.rows, 3);
}
