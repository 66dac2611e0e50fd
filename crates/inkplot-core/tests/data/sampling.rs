use inkplot_core::{Point, Segment};
use proptest::prelude::*;

#[test]
fn test_quadratic_elevation_keeps_curve() {
    let start = Point::new(0.0, 0.0);
    let control = Point::new(5.0, 10.0);
    let end = Point::new(10.0, 0.0);
    let cubic = Segment::quadratic(start, control, end);

    // B(0.5) of the quadratic is 0.25*P0 + 0.5*C + 0.25*P1
    let mid = cubic.point_at(0.5);
    assert!((mid.x - 5.0).abs() < 1e-9);
    assert!((mid.y - 5.0).abs() < 1e-9);
}

#[test]
fn test_zero_divisions_treated_as_one() {
    let seg = Segment::line(Point::new(0.0, 0.0), Point::new(4.0, 0.0));
    assert_eq!(seg.sample(0), vec![Point::new(0.0, 0.0), Point::new(4.0, 0.0)]);
}

proptest! {
    #[test]
    fn sample_hits_both_endpoints(
        coords in prop::array::uniform8(-500.0f64..500.0),
        divisions in 1usize..64,
    ) {
        let seg = Segment::cubic(
            Point::new(coords[0], coords[1]),
            Point::new(coords[2], coords[3]),
            Point::new(coords[4], coords[5]),
            Point::new(coords[6], coords[7]),
        );
        let points = seg.sample(divisions);
        prop_assert_eq!(points.len(), divisions + 1);
        prop_assert!(points[0].distance_to(&seg.start()) < 1e-9);
        prop_assert!(points[divisions].distance_to(&seg.end()) < 1e-9);
    }

    #[test]
    fn line_length_matches_distance(
        x0 in -500.0f64..500.0, y0 in -500.0f64..500.0,
        x1 in -500.0f64..500.0, y1 in -500.0f64..500.0,
    ) {
        let (a, b) = (Point::new(x0, y0), Point::new(x1, y1));
        prop_assert!((Segment::line(a, b).length() - a.distance_to(&b)).abs() < 1e-9);
    }
}
