use std::sync::Arc;

use kerfkit_core::TessellationError;
use kerfkit_geometry::bezier::{sample_count, Tessellator};
use kerfkit_geometry::{bezier, BinomialCache, Point};

fn arch() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(0.0, 10.0),
        Point::new(10.0, 10.0),
        Point::new(10.0, 0.0),
    ]
}

#[test]
fn test_cubic_arch_end_to_end() {
    let line = bezier(&arch(), 0.1).unwrap();

    assert_eq!(line.first(), Some(Point::new(0.0, 0.0)));
    assert_eq!(line.last(), Some(Point::new(10.0, 0.0)));
    // well above the eight-sample floor once simplified
    assert!(line.len() >= 10, "only {} points", line.len());

    // x grows with the curve parameter for this control polygon
    for w in line.points.windows(2) {
        assert!(w[1].x > w[0].x);
    }

    // the apex of the arch sits at t = 0.5
    let top = line
        .points
        .iter()
        .map(|p| p.y)
        .fold(f64::NEG_INFINITY, f64::max);
    assert!((top - 7.5).abs() < 0.1);
}

#[test]
fn test_two_points_are_exact() {
    let pts = [Point::new(1.5, -2.0), Point::new(4.0, 8.25)];
    let line = bezier(&pts, 0.01).unwrap();
    assert_eq!(line.points, pts.to_vec());
}

#[test]
fn test_sample_count_for_straight_input() {
    let pts = [Point::new(0.0, 0.0), Point::new(100.0, 0.0)];
    assert_eq!(sample_count(&pts, 0.1), 2);
}

#[test]
fn test_collinear_control_points_simplify_to_chord() {
    let pts = [
        Point::new(0.0, 0.0),
        Point::new(5.0, 0.0),
        Point::new(10.0, 0.0),
    ];
    let line = bezier(&pts, 0.1).unwrap();
    assert_eq!(line.points, vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
}

#[test]
fn test_high_degree_curve_stays_within_hull() {
    let pts: Vec<Point> = (0..12)
        .map(|i| Point::new(i as f64, if i % 2 == 0 { 0.0 } else { 6.0 }))
        .collect();
    let line = bezier(&pts, 0.05).unwrap();
    let eps = 1e-9;
    for p in &line.points {
        assert!(p.x >= -eps && p.x <= 11.0 + eps);
        assert!(p.y >= -eps && p.y <= 6.0 + eps);
    }
}

#[test]
fn test_tessellator_fills_its_own_cache() {
    let cache = Arc::new(BinomialCache::new());
    let tess = Tessellator::new(cache.clone());
    tess.bezier(&arch(), 0.5).unwrap();
    assert_eq!(&*cache.row(4), &[1.0, 3.0, 3.0, 1.0]);
    assert!(Arc::ptr_eq(tess.cache(), &cache));
}

#[test]
fn test_errors() {
    assert_eq!(bezier(&[], 0.1), Err(TessellationError::NoControlPoints));
    assert_eq!(
        bezier(&arch(), -1.0),
        Err(TessellationError::InvalidTolerance { tolerance: -1.0 })
    );
}
