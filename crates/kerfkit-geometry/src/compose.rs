//! Flattening and canonical grouping of geometry values.
//!
//! [`compose`] accepts any mix of atoms, multi containers and nested
//! collections and returns the smallest equivalent value: atoms of the same
//! kind are gathered into one multi container, a lone atom stays as it is,
//! and a single result is returned without a wrapping collection.

use crate::model::{Geometry, LinearRing, Point, Polygon, Polyline};

/// Every atom reachable from `geometry`, in traversal order.
pub fn flatten(geometry: &Geometry) -> Vec<Geometry> {
    let mut out = Vec::new();
    flatten_into(geometry.clone(), &mut out);
    out
}

fn flatten_into(geometry: Geometry, out: &mut Vec<Geometry>) {
    match geometry {
        Geometry::MultiPoint(v) => out.extend(v.into_iter().map(Geometry::Point)),
        Geometry::MultiPolyline(v) => out.extend(v.into_iter().map(Geometry::Polyline)),
        Geometry::MultiPolygon(v) => out.extend(v.into_iter().map(Geometry::Polygon)),
        Geometry::Collection(v) => {
            for g in v {
                flatten_into(g, out);
            }
        }
        atom => out.push(atom),
    }
}

enum Bucket {
    Points(Vec<Point>),
    Polylines(Vec<Polyline>),
    Polygons(Vec<Polygon>),
    Ring(LinearRing),
}

impl Bucket {
    fn into_geometry(self) -> Geometry {
        match self {
            Bucket::Points(mut v) if v.len() == 1 => Geometry::Point(v.remove(0)),
            Bucket::Points(v) => Geometry::MultiPoint(v),
            Bucket::Polylines(mut v) if v.len() == 1 => Geometry::Polyline(v.remove(0)),
            Bucket::Polylines(v) => Geometry::MultiPolyline(v),
            Bucket::Polygons(mut v) if v.len() == 1 => Geometry::Polygon(v.remove(0)),
            Bucket::Polygons(v) => Geometry::MultiPolygon(v),
            Bucket::Ring(r) => Geometry::Ring(r),
        }
    }
}

/// Flattens and regroups `items` into one canonical value.
///
/// Buckets appear in the order their kind is first met; members keep their
/// input order. Rings are passed through where they occur. Empty input gives
/// an empty collection.
pub fn compose<I, G>(items: I) -> Geometry
where
    I: IntoIterator<Item = G>,
    G: Into<Geometry>,
{
    let mut atoms = Vec::new();
    for item in items {
        flatten_into(item.into(), &mut atoms);
    }

    let mut buckets: Vec<Bucket> = Vec::new();
    // slot of the point/polyline/polygon bucket once it exists
    let mut slots: [Option<usize>; 3] = [None; 3];

    for atom in atoms {
        match atom {
            Geometry::Point(p) => match slots[0] {
                Some(i) => {
                    if let Bucket::Points(v) = &mut buckets[i] {
                        v.push(p);
                    }
                }
                None => {
                    slots[0] = Some(buckets.len());
                    buckets.push(Bucket::Points(vec![p]));
                }
            },
            Geometry::Polyline(l) => match slots[1] {
                Some(i) => {
                    if let Bucket::Polylines(v) = &mut buckets[i] {
                        v.push(l);
                    }
                }
                None => {
                    slots[1] = Some(buckets.len());
                    buckets.push(Bucket::Polylines(vec![l]));
                }
            },
            Geometry::Polygon(p) => match slots[2] {
                Some(i) => {
                    if let Bucket::Polygons(v) = &mut buckets[i] {
                        v.push(p);
                    }
                }
                None => {
                    slots[2] = Some(buckets.len());
                    buckets.push(Bucket::Polygons(vec![p]));
                }
            },
            Geometry::Ring(r) => buckets.push(Bucket::Ring(r)),
            // flatten_into only yields atoms
            _ => {}
        }
    }

    let mut groups: Vec<Geometry> = buckets.into_iter().map(Bucket::into_geometry).collect();
    if groups.len() == 1 {
        groups.remove(0)
    } else {
        Geometry::Collection(groups)
    }
}

impl Geometry {
    /// Every atom reachable from this value, in traversal order.
    pub fn atoms(&self) -> Vec<Geometry> {
        flatten(self)
    }

    /// This value in canonical form.
    pub fn canonical(&self) -> Geometry {
        compose([self.clone()])
    }
}

/// Composes a heterogeneous argument list.
///
/// ```
/// use kerfkit_geometry::compose;
/// use kerfkit_geometry::model::{rect, Point};
///
/// let g = compose!(Point::new(0.0, 0.0), rect((0.0, 1.0), (0.0, 1.0)));
/// assert_eq!(g.atoms().len(), 2);
/// ```
#[macro_export]
macro_rules! compose {
    () => {
        $crate::compose::compose(::std::vec::Vec::<$crate::model::Geometry>::new())
    };
    ($($g:expr),+ $(,)?) => {
        $crate::compose::compose([$($crate::model::Geometry::from($g)),+])
    };
}
