use std::f64::consts::PI;

use kerfkit_core::ToolkitConfig;
use kerfkit_geometry::model::rect;
use kerfkit_geometry::rounding::resolution;
use kerfkit_geometry::{round, Geometry, GeometryKind, Point, Polygon, RoundingOptions};

fn area(g: &Geometry) -> f64 {
    g.polygons().iter().map(|p| p.area()).sum()
}

fn l_shape() -> Polygon {
    Polygon::from_points(vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 5.0),
        Point::new(5.0, 5.0),
        Point::new(5.0, 10.0),
        Point::new(0.0, 10.0),
    ])
}

#[test]
fn test_rounded_vertices_lie_on_corner_arcs() {
    let tolerance = 0.1;
    let radius = 2.0;
    let g = Geometry::from(rect((0.0, 10.0), (0.0, 10.0)));
    let out = round(&g, radius, &RoundingOptions::new(tolerance)).unwrap();

    let polys = out.polygons();
    assert_eq!(polys.len(), 1);
    for p in &polys[0].exterior.points {
        // nearest point of the eroded square
        let core = Point::new(p.x.clamp(2.0, 8.0), p.y.clamp(2.0, 8.0));
        assert!((p.distance_to(&core) - radius).abs() < tolerance);
    }
}

#[test]
fn test_rounding_area_is_bounded() {
    let g = Geometry::from(rect((0.0, 10.0), (0.0, 10.0)));
    for radius in [0.5, 1.0, 2.5] {
        let out = round(&g, radius, &RoundingOptions::new(0.05)).unwrap();
        let lost = 100.0 - area(&out);
        let max_lost = (4.0 - PI) * radius * radius;
        assert!(lost > 0.0);
        assert!(lost <= max_lost + 0.05, "radius {} lost {}", radius, lost);
    }
}

#[test]
fn test_negative_radius_fills_concave_corner() {
    let g = Geometry::from(l_shape());
    let out = round(&g, -1.0, &RoundingOptions::new(0.01)).unwrap();
    assert_eq!(out.kind(), GeometryKind::Polygon);
    let expected = 75.0 + (1.0 - PI / 4.0);
    assert!((area(&out) - expected).abs() < 0.02, "area {}", area(&out));
}

#[test]
fn test_positive_radius_keeps_concave_corner() {
    let g = Geometry::from(l_shape());
    let out = round(&g, 1.0, &RoundingOptions::new(0.01)).unwrap();
    // five convex corners lose (1 - π/4) each
    let expected = 75.0 - 5.0 * (1.0 - PI / 4.0);
    assert!((area(&out) - expected).abs() < 0.02, "area {}", area(&out));
}

#[test]
fn test_overlapping_members_round_as_one_shape() {
    let g = Geometry::MultiPolygon(vec![
        rect((0.0, 10.0), (0.0, 10.0)),
        rect((5.0, 15.0), (0.0, 10.0)),
    ]);
    let out = round(&g, 1.0, &RoundingOptions::new(0.01)).unwrap();
    assert_eq!(out.kind(), GeometryKind::Polygon);

    // the 15x10 union with four rounded corners
    let expected = 150.0 - (4.0 - PI);
    assert!((area(&out) - expected).abs() < 0.02, "area {}", area(&out));
}

#[test]
fn test_negative_radius_bridges_narrow_gap() {
    let g = Geometry::MultiPolygon(vec![
        rect((0.0, 10.0), (0.0, 10.0)),
        rect((11.0, 21.0), (0.0, 10.0)),
    ]);
    let out = round(&g, -1.0, &RoundingOptions::new(0.01)).unwrap();
    assert_eq!(out.kind(), GeometryKind::Polygon);

    // the gap fills except for a shallow notch top and bottom
    let a = area(&out);
    assert!(a > 205.0 && a < 210.0, "area {}", a);
}

#[test]
fn test_separate_members_stay_separate() {
    let g = Geometry::MultiPolygon(vec![
        rect((0.0, 4.0), (0.0, 4.0)),
        rect((10.0, 14.0), (0.0, 4.0)),
    ]);
    let out = round(&g, 1.0, &RoundingOptions::default()).unwrap();
    assert_eq!(out.kind(), GeometryKind::MultiPolygon);
}

#[test]
fn test_text_options_raise_resolution_floor() {
    let config = ToolkitConfig::default();
    let plain = RoundingOptions::from_config(&config);
    let text = RoundingOptions::for_text(&config);
    assert_eq!(plain.resolution(0.01), 2);
    assert_eq!(text.resolution(0.01), 16);
    assert_eq!(resolution(10.0, 0.1, 16), 158);
}
