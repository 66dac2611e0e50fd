use inkplot_camtools::{normalize, split_path, PathCurator};
use inkplot_core::{Document, Path, Point, Segment};
use inkplot_settings::ToolpathConfig;
use proptest::prelude::*;

fn point() -> impl Strategy<Value = Point> {
    (-500.0..500.0f64, -500.0..500.0f64).prop_map(|(x, y)| Point::new(x, y))
}

fn segment() -> impl Strategy<Value = Segment> {
    prop_oneof![
        (point(), point()).prop_map(|(a, b)| Segment::line(a, b)),
        (point(), point(), point(), point()).prop_map(|(a, c1, c2, b)| Segment::cubic(a, c1, c2, b)),
    ]
}

fn document() -> impl Strategy<Value = Document> {
    prop::collection::vec(prop::collection::vec(segment(), 1..6), 1..12).prop_map(|paths| {
        Document::new(
            paths
                .into_iter()
                .enumerate()
                .map(|(i, segments)| Path::new(i, segments))
                .collect(),
        )
    })
}

proptest! {
    #[test]
    fn normalization_is_idempotent(doc in document()) {
        let once = normalize(doc).unwrap();
        let twice = normalize(once.clone()).unwrap();
        prop_assert_eq!(&once, &twice);

        let bbox = once.bounding_box().unwrap();
        prop_assert!(bbox.min_x.abs() <= 1e-9);
        prop_assert!(bbox.min_y.abs() <= 1e-9);
    }

    #[test]
    fn split_conserves_segments(segments in prop::collection::vec(segment(), 1..20), threshold in 0.0..50.0f64) {
        let path = Path::new(0, segments.clone());
        let pieces = split_path(&path, threshold);
        let rejoined: Vec<Segment> = pieces.iter().flat_map(|p| p.segments.clone()).collect();
        prop_assert_eq!(rejoined, segments);
        prop_assert!(pieces.iter().all(|p| !p.is_empty()));
        prop_assert_eq!(pieces.len(), path.gaps(threshold).len() + 1);
    }

    #[test]
    fn dedupe_keeps_the_earlier_copy(doc in document(), pick in any::<prop::sample::Index>()) {
        let original = pick.get(&doc.paths).clone();
        let mut paths = doc.paths.clone();
        let copy_index = paths.len();
        paths.push(Path::new(copy_index, original.segments.clone()));

        let out = PathCurator::new(&ToolpathConfig::default()).dedupe(Document::new(paths));
        prop_assert!(out.paths.iter().all(|p| p.index != copy_index));
        prop_assert!(out.paths.iter().any(|p| p.segments == original.segments));
    }
}
