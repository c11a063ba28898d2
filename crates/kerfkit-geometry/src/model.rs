//! Geometry value types.
//!
//! Every value here is immutable in practice: operations such as
//! [`Geometry::translate`] or [`LinearRing::oriented`] return new values.
//! Ring orientation is never stored; it is derived from the signed area
//! whenever it matters.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

/// Traversal sense of a closed ring, in a y-up frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

impl Winding {
    pub fn reversed(self) -> Self {
        match self {
            Winding::Clockwise => Winding::CounterClockwise,
            Winding::CounterClockwise => Winding::Clockwise,
        }
    }
}

/// An open chain of points.
///
/// Producers in this crate always emit at least two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<Point>,
}

impl Polyline {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total length of all segments.
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| w[0].distance_to(&w[1]))
            .sum()
    }
}

impl<P: Into<Point>> FromIterator<P> for Polyline {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// A closed ring. The closing edge from the last point back to the first is
/// implicit; a repeated closing point is dropped on construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRing {
    pub points: Vec<Point>,
}

impl LinearRing {
    pub fn new(mut points: Vec<Point>) -> Self {
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Shoelace area; positive for counter-clockwise rings.
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut twice_area = 0.0;
        for i in 0..n {
            let p1 = self.points[i];
            let p2 = self.points[(i + 1) % n];
            twice_area += p1.x * p2.y - p2.x * p1.y;
        }
        twice_area / 2.0
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Degenerate rings (zero area) report counter-clockwise.
    pub fn winding(&self) -> Winding {
        if self.signed_area() < 0.0 {
            Winding::Clockwise
        } else {
            Winding::CounterClockwise
        }
    }

    /// A copy of this ring traversed in the requested sense.
    pub fn oriented(&self, winding: Winding) -> LinearRing {
        let mut points = self.points.clone();
        if self.winding() != winding {
            points.reverse();
        }
        LinearRing { points }
    }

    /// Even-odd ray casting test. Points on the boundary may report either way.
    pub fn contains(&self, p: &Point) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (xi, yi) = (self.points[i].x, self.points[i].y);
            let (xj, yj) = (self.points[j].x, self.points[j].y);
            if ((yi > p.y) != (yj > p.y)) && (p.x < (xj - xi) * (p.y - yi) / (yj - yi) + xi) {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// The ring as an explicit open chain ending back at its first point.
    pub fn to_closed_polyline(&self) -> Polyline {
        let mut points = self.points.clone();
        if let Some(first) = self.points.first() {
            points.push(*first);
        }
        Polyline { points }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub exterior: LinearRing,
    pub holes: Vec<LinearRing>,
}

impl Polygon {
    pub fn new(exterior: LinearRing) -> Self {
        Self {
            exterior,
            holes: Vec::new(),
        }
    }

    pub fn with_holes(exterior: LinearRing, holes: Vec<LinearRing>) -> Self {
        Self { exterior, holes }
    }

    pub fn from_points(points: Vec<Point>) -> Self {
        Self::new(LinearRing::new(points))
    }

    /// Filled area: exterior minus holes, independent of ring orientation.
    pub fn area(&self) -> f64 {
        self.exterior.area() - self.holes.iter().map(LinearRing::area).sum::<f64>()
    }

    pub fn rings(&self) -> impl Iterator<Item = &LinearRing> {
        std::iter::once(&self.exterior).chain(self.holes.iter())
    }
}

/// Axis-aligned rectangle spanning `x.0..x.1` by `y.0..y.1`.
pub fn rect(x: (f64, f64), y: (f64, f64)) -> Polygon {
    Polygon::from_points(vec![
        Point::new(x.0, y.0),
        Point::new(x.1, y.0),
        Point::new(x.1, y.1),
        Point::new(x.0, y.1),
    ])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    Point,
    Polyline,
    Ring,
    Polygon,
    MultiPoint,
    MultiPolyline,
    MultiPolygon,
    Collection,
}

/// Any geometry value: an atom, a homogeneous multi container, or a
/// heterogeneous collection which may nest further.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Point(Point),
    Polyline(Polyline),
    Ring(LinearRing),
    Polygon(Polygon),
    MultiPoint(Vec<Point>),
    MultiPolyline(Vec<Polyline>),
    MultiPolygon(Vec<Polygon>),
    Collection(Vec<Geometry>),
}

impl Geometry {
    pub fn empty() -> Self {
        Geometry::Collection(Vec::new())
    }

    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::Polyline(_) => GeometryKind::Polyline,
            Geometry::Ring(_) => GeometryKind::Ring,
            Geometry::Polygon(_) => GeometryKind::Polygon,
            Geometry::MultiPoint(_) => GeometryKind::MultiPoint,
            Geometry::MultiPolyline(_) => GeometryKind::MultiPolyline,
            Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
            Geometry::Collection(_) => GeometryKind::Collection,
        }
    }

    pub fn is_atom(&self) -> bool {
        matches!(
            self,
            Geometry::Point(_) | Geometry::Polyline(_) | Geometry::Ring(_) | Geometry::Polygon(_)
        )
    }

    /// True when no atom is reachable from this value.
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(_) | Geometry::Polyline(_) | Geometry::Ring(_) | Geometry::Polygon(_) => {
                false
            }
            Geometry::MultiPoint(v) => v.is_empty(),
            Geometry::MultiPolyline(v) => v.is_empty(),
            Geometry::MultiPolygon(v) => v.is_empty(),
            Geometry::Collection(v) => v.iter().all(Geometry::is_empty),
        }
    }

    /// Every polygon reachable from this value, in traversal order.
    pub fn polygons(&self) -> Vec<&Polygon> {
        let mut out = Vec::new();
        self.collect_polygons(&mut out);
        out
    }

    fn collect_polygons<'a>(&'a self, out: &mut Vec<&'a Polygon>) {
        match self {
            Geometry::Polygon(p) => out.push(p),
            Geometry::MultiPolygon(v) => out.extend(v.iter()),
            Geometry::Collection(v) => {
                for g in v {
                    g.collect_polygons(out);
                }
            }
            _ => {}
        }
    }

    /// Bounding box as `(min_x, min_y, max_x, max_y)`, `None` when empty.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        let mut any = false;

        self.for_each_point(&mut |p| {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
            any = true;
        });

        any.then_some((min_x, min_y, max_x, max_y))
    }

    fn for_each_point(&self, f: &mut impl FnMut(Point)) {
        match self {
            Geometry::Point(p) => f(*p),
            Geometry::Polyline(l) => l.points.iter().copied().for_each(&mut *f),
            Geometry::Ring(r) => r.points.iter().copied().for_each(&mut *f),
            Geometry::Polygon(p) => {
                for ring in p.rings() {
                    ring.points.iter().copied().for_each(&mut *f);
                }
            }
            Geometry::MultiPoint(v) => v.iter().copied().for_each(&mut *f),
            Geometry::MultiPolyline(v) => {
                for l in v {
                    l.points.iter().copied().for_each(&mut *f);
                }
            }
            Geometry::MultiPolygon(v) => {
                for p in v {
                    for ring in p.rings() {
                        ring.points.iter().copied().for_each(&mut *f);
                    }
                }
            }
            Geometry::Collection(v) => {
                for g in v {
                    g.for_each_point(f);
                }
            }
        }
    }

    /// A copy with every coordinate passed through `f`. Structure is kept.
    pub fn map_points(&self, f: &impl Fn(Point) -> Point) -> Geometry {
        let line = |l: &Polyline| Polyline::new(l.points.iter().map(|p| f(*p)).collect());
        let ring = |r: &LinearRing| LinearRing {
            points: r.points.iter().map(|p| f(*p)).collect(),
        };
        let polygon = |p: &Polygon| Polygon {
            exterior: ring(&p.exterior),
            holes: p.holes.iter().map(ring).collect(),
        };

        match self {
            Geometry::Point(p) => Geometry::Point(f(*p)),
            Geometry::Polyline(l) => Geometry::Polyline(line(l)),
            Geometry::Ring(r) => Geometry::Ring(ring(r)),
            Geometry::Polygon(p) => Geometry::Polygon(polygon(p)),
            Geometry::MultiPoint(v) => Geometry::MultiPoint(v.iter().map(|p| f(*p)).collect()),
            Geometry::MultiPolyline(v) => Geometry::MultiPolyline(v.iter().map(line).collect()),
            Geometry::MultiPolygon(v) => Geometry::MultiPolygon(v.iter().map(polygon).collect()),
            Geometry::Collection(v) => {
                Geometry::Collection(v.iter().map(|g| g.map_points(f)).collect())
            }
        }
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Geometry {
        self.map_points(&|p| Point::new(p.x + dx, p.y + dy))
    }

    /// Uniform scale about the origin.
    pub fn scale(&self, factor: f64) -> Geometry {
        self.map_points(&|p| Point::new(p.x * factor, p.y * factor))
    }

    /// Outlines of the areal parts as open polylines; polylines are kept,
    /// points have no boundary.
    pub fn boundary(&self) -> Geometry {
        let mut lines = Vec::new();
        self.collect_boundary(&mut lines);
        match lines.len() {
            1 => Geometry::Polyline(lines.remove(0)),
            _ => Geometry::MultiPolyline(lines),
        }
    }

    fn collect_boundary(&self, out: &mut Vec<Polyline>) {
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => {}
            Geometry::Polyline(l) => out.push(l.clone()),
            Geometry::Ring(r) => out.push(r.to_closed_polyline()),
            Geometry::Polygon(p) => out.extend(p.rings().map(LinearRing::to_closed_polyline)),
            Geometry::MultiPolyline(v) => out.extend(v.iter().cloned()),
            Geometry::MultiPolygon(v) => {
                for p in v {
                    out.extend(p.rings().map(LinearRing::to_closed_polyline));
                }
            }
            Geometry::Collection(v) => {
                for g in v {
                    g.collect_boundary(out);
                }
            }
        }
    }
}

impl From<Point> for Geometry {
    fn from(p: Point) -> Self {
        Geometry::Point(p)
    }
}

impl From<Polyline> for Geometry {
    fn from(l: Polyline) -> Self {
        Geometry::Polyline(l)
    }
}

impl From<LinearRing> for Geometry {
    fn from(r: LinearRing) -> Self {
        Geometry::Ring(r)
    }
}

impl From<Polygon> for Geometry {
    fn from(p: Polygon) -> Self {
        Geometry::Polygon(p)
    }
}

/// Any sequence of shapes becomes a (possibly nested) collection.
impl<T: Into<Geometry>> From<Vec<T>> for Geometry {
    fn from(v: Vec<T>) -> Self {
        Geometry::Collection(v.into_iter().map(Into::into).collect())
    }
}
