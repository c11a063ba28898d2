use kerfkit_geometry::model::rect;
use kerfkit_geometry::{compose, Geometry, GeometryKind, Point, Polyline};

fn line(i: f64) -> Polyline {
    Polyline::new(vec![Point::new(i, 0.0), Point::new(i, 1.0)])
}

#[test]
fn test_grouping_by_kind() {
    let g = compose!(
        Point::new(0.0, 0.0),
        line(0.0),
        line(1.0),
        rect((0.0, 1.0), (0.0, 1.0)),
        rect((2.0, 3.0), (0.0, 1.0)),
        rect((4.0, 5.0), (0.0, 1.0)),
    );

    match g {
        Geometry::Collection(groups) => {
            let kinds: Vec<_> = groups.iter().map(Geometry::kind).collect();
            assert_eq!(
                kinds,
                vec![
                    GeometryKind::Point,
                    GeometryKind::MultiPolyline,
                    GeometryKind::MultiPolygon
                ]
            );
            if let Geometry::MultiPolygon(polys) = &groups[2] {
                assert_eq!(polys.len(), 3);
            }
        }
        other => panic!("expected a collection, got {:?}", other.kind()),
    }
}

#[test]
fn test_idempotent_on_single_atom() {
    let square = Geometry::from(rect((0.0, 1.0), (0.0, 1.0)));
    assert_eq!(compose([square.clone()]), square);
    assert_eq!(compose([compose([square.clone()])]), square);
}

#[test]
fn test_associative() {
    let a = Geometry::from(line(0.0));
    let b = Geometry::from(Point::new(3.0, 3.0));
    let c = Geometry::from(line(2.0));

    let left = compose([compose([a.clone(), b.clone()]), c.clone()]);
    let right = compose([a.clone(), compose([b.clone(), c.clone()])]);
    let flat = compose([a, b, c]);
    assert_eq!(left, flat);
    assert_eq!(right, flat);
}

#[test]
fn test_plain_sequences_are_accepted() {
    let lines = vec![line(0.0), line(1.0), line(2.0)];
    assert_eq!(compose(lines.clone()), Geometry::MultiPolyline(lines));
}

#[test]
fn test_deep_nesting() {
    let mut g = Geometry::from(Point::new(1.0, 1.0));
    for _ in 0..50 {
        g = Geometry::Collection(vec![g]);
    }
    assert_eq!(compose([g]), Geometry::Point(Point::new(1.0, 1.0)));
}

#[test]
fn test_empty_members_vanish() {
    let g = compose!(
        Geometry::empty(),
        Geometry::MultiPoint(vec![]),
        Point::new(0.0, 0.0)
    );
    assert_eq!(g, Geometry::Point(Point::new(0.0, 0.0)));
}
