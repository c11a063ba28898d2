//! Polygon offsetting and booleans on top of `cavalier_contours`.
//!
//! A [`Region`] is the area covered by its `pos` boundaries minus the area
//! covered by its `neg` boundaries. Outer boundaries are kept
//! counter-clockwise and holes clockwise. Offsets use round joins, so the
//! boundaries coming back from the engine carry arcs (bulges) which are
//! flattened again in [`Region::to_polygons`].

use std::f64::consts::FRAC_PI_2;

use cavalier_contours::core::math::angle_from_bulge;
use cavalier_contours::polyline::{
    seg_arc_radius_and_center, BooleanOp, BooleanResultInfo, PlineOffsetOptions,
    PlineOrientation, PlineSource, PlineSourceMut, PlineVertex, Polyline as Pline,
};
use kerfkit_core::OffsetError;
use tracing::debug;

use crate::compose::compose;
use crate::model::{Geometry, LinearRing, Point, Polygon, Winding};

/// Segments per quarter circle used when a caller has no better figure.
pub const DEFAULT_RESOLUTION: usize = 16;

const REDUNDANT_EPS: f64 = 1e-6;

#[derive(Debug, Clone, Default)]
pub struct Region {
    pub pos: Vec<Pline<f64>>,
    pub neg: Vec<Pline<f64>>,
}

impl Region {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_pos(pos: Vec<Pline<f64>>) -> Self {
        Self { pos, neg: vec![] }
    }

    /// One polygon as a region; rings with fewer than three points are
    /// skipped.
    pub fn from_polygon(polygon: &Polygon) -> Self {
        let pos = ring_to_pline(&polygon.exterior, PlineOrientation::CounterClockwise)
            .into_iter()
            .collect();
        let neg = polygon
            .holes
            .iter()
            .filter_map(|h| ring_to_pline(h, PlineOrientation::Clockwise))
            .collect();
        Self { pos, neg }
    }

    /// Union of every polygon reachable from `geometry`.
    pub fn from_geometry(geometry: &Geometry) -> Self {
        geometry
            .polygons()
            .into_iter()
            .fold(Region::empty(), |acc, p| acc.union(&Region::from_polygon(p)))
    }

    pub fn is_empty(&self) -> bool {
        self.pos.is_empty()
    }

    /// Merges overlapping boundaries, keeping any holes the merge creates.
    pub fn union_all(mut plines: Vec<Pline<f64>>) -> Self {
        plines.retain(|p| p.is_closed() && p.vertex_count() >= 2);
        let plines = plines.into_iter().map(simplify).collect();
        let (pos, neg) = merge_plines(plines);
        Self {
            pos: normalize_winding(pos, PlineOrientation::CounterClockwise),
            neg: normalize_winding(merge_plines(neg).0, PlineOrientation::Clockwise),
        }
    }

    pub fn subtract_all(&mut self, cutters: &[Pline<f64>]) {
        let mut new_pos = Vec::new();
        let mut new_neg = Vec::new();

        for p in std::mem::take(&mut self.pos) {
            let mut cur_pos = vec![p];
            for c in cutters {
                let mut next_pos = Vec::new();
                for cp in cur_pos {
                    let res = cp.boolean(c, BooleanOp::Not);
                    next_pos.extend(res.pos_plines.into_iter().map(|p| p.pline));
                    new_neg.extend(res.neg_plines.into_iter().map(|p| p.pline));
                }
                cur_pos = next_pos;
            }
            new_pos.extend(cur_pos);
        }

        self.pos = normalize_winding(merge_plines(new_pos).0, PlineOrientation::CounterClockwise);
        self.neg
            .extend(normalize_winding(merge_plines(new_neg).0, PlineOrientation::Clockwise));
    }

    /// Signed round-join offset: positive grows the region, negative
    /// shrinks it. Boundaries that collapse disappear.
    pub fn offset(&self, distance: f64) -> Region {
        if distance == 0.0 {
            return self.clone();
        }

        let abs = distance.abs();
        let shrink = distance < 0.0;
        let opts = PlineOffsetOptions {
            handle_self_intersects: true,
            ..Default::default()
        };

        let mut pos_out = Vec::new();
        for p in &self.pos {
            pos_out.extend(p.parallel_offset_opt(signed_offset_for(p, abs, shrink), &opts));
        }
        let mut neg_out = Vec::new();
        for p in &self.neg {
            neg_out.extend(p.parallel_offset_opt(signed_offset_for(p, abs, !shrink), &opts));
        }

        let mut out = Region::union_all(pos_out);
        if !neg_out.is_empty() {
            out.subtract_all(&neg_out);
        }
        debug!(
            "Offset region by {}: {} outer/{} inner -> {} outer/{} inner",
            distance,
            self.pos.len(),
            self.neg.len(),
            out.pos.len(),
            out.neg.len()
        );
        out
    }

    pub fn union(&self, other: &Region) -> Region {
        if self.pos.is_empty() && self.neg.is_empty() {
            return other.clone();
        }

        let mut pos = self.pos.clone();
        pos.extend(other.pos.iter().cloned());
        let mut out = Region::union_all(pos);

        // holes survive only where the other side does not cover them;
        // islands left inside a hole are not representable here, see `dissolve`
        for (holes, cover) in [(&self.neg, &other.pos), (&other.neg, &self.pos)] {
            if holes.is_empty() {
                continue;
            }
            let mut uncovered = Region::from_pos(normalize_winding(
                holes.clone(),
                PlineOrientation::CounterClockwise,
            ));
            if !cover.is_empty() {
                uncovered.subtract_all(cover);
            }
            out.neg
                .extend(normalize_winding(uncovered.pos, PlineOrientation::Clockwise));
        }
        out
    }

    /// True when the two regions share some area.
    pub fn overlaps(&self, other: &Region) -> bool {
        !self.is_empty() && !other.is_empty() && !self.intersection(other).is_empty()
    }

    pub fn difference(&self, other: &Region) -> Region {
        if self.is_empty() {
            return Region::empty();
        }

        let mut out = self.clone();
        if !other.pos.is_empty() {
            out.subtract_all(&other.pos);
        }
        if !other.neg.is_empty() {
            // whatever sat inside the other region's holes comes back
            let back = self.intersection(&Region::from_pos(other.neg.clone()));
            out = out.union(&back);
        }
        out
    }

    pub fn intersection(&self, other: &Region) -> Region {
        let mut out_pos = Vec::new();
        let mut out_neg = Vec::new();

        for pa in &self.pos {
            for pb in &other.pos {
                let res = pa.boolean(pb, BooleanOp::And);
                if matches!(res.result_info, BooleanResultInfo::InvalidInput) {
                    continue;
                }
                out_pos.extend(res.pos_plines.into_iter().map(|p| p.pline));
                out_neg.extend(res.neg_plines.into_iter().map(|p| p.pline));
            }
        }

        let mut region = Region::union_all(out_pos);
        for cutters in [&out_neg, &self.neg, &other.neg] {
            if !cutters.is_empty() {
                region.subtract_all(cutters);
            }
        }
        region
    }

    /// Flattens the region into polygons. Arcs are split into `resolution`
    /// segments per quarter circle; every hole goes to the smallest exterior
    /// containing it.
    pub fn to_polygons(&self, resolution: usize) -> Vec<Polygon> {
        let resolution = resolution.max(1);
        let mut polygons: Vec<Polygon> = self
            .pos
            .iter()
            .map(|p| flatten_pline(p, resolution))
            .filter(|r| r.len() >= 3)
            .map(|r| Polygon::new(r.oriented(Winding::CounterClockwise)))
            .collect();

        for hole in self.neg.iter().map(|p| flatten_pline(p, resolution)) {
            if hole.len() < 3 {
                continue;
            }
            let owner = polygons
                .iter_mut()
                .filter(|p| encloses(&p.exterior, &hole))
                .min_by(|a, b| a.exterior.area().total_cmp(&b.exterior.area()));
            match owner {
                Some(owner) => owner.holes.push(hole.oriented(Winding::Clockwise)),
                None => debug!("Dropping hole with no enclosing boundary at {:?}", hole.points[0]),
            }
        }
        polygons
    }
}

/// Unions `regions` into pairwise disjoint components.
///
/// Regions that share area are merged; regions that only sit inside each
/// other's holes stay apart, so an island in a hole keeps its own component.
pub fn dissolve(regions: impl IntoIterator<Item = Region>) -> Vec<Region> {
    let mut components: Vec<Region> = Vec::new();
    for region in regions {
        if region.is_empty() {
            continue;
        }
        let mut merged = region;
        let mut i = 0;
        while i < components.len() {
            if components[i].overlaps(&merged) {
                merged = components.swap_remove(i).union(&merged);
            } else {
                i += 1;
            }
        }
        components.push(merged);
    }
    components
}

/// Disjoint components covering every polygon of `geometry`.
pub fn components(geometry: &Geometry) -> Vec<Region> {
    dissolve(geometry.polygons().into_iter().map(Region::from_polygon))
}

/// Offsets each component and merges whatever the offset made overlap.
pub fn offset_components(components: &[Region], distance: f64) -> Vec<Region> {
    dissolve(components.iter().map(|c| c.offset(distance)))
}

/// Offsets the area covered by `geometry` by `distance`, flattening arcs at
/// `resolution` segments per quarter circle.
///
/// Overlapping polygons are merged first and again after the offset.
pub fn buffer(geometry: &Geometry, distance: f64, resolution: usize) -> Result<Geometry, OffsetError> {
    check_distance(distance)?;
    check_resolution(resolution)?;

    let grown = offset_components(&components(geometry), distance);
    Ok(compose(flatten_components(&grown, resolution)))
}

pub(crate) fn flatten_components(components: &[Region], resolution: usize) -> Vec<Polygon> {
    components
        .iter()
        .flat_map(|c| c.to_polygons(resolution))
        .collect()
}

pub fn union(a: &Geometry, b: &Geometry) -> Geometry {
    let region = Region::from_geometry(a).union(&Region::from_geometry(b));
    compose(region.to_polygons(DEFAULT_RESOLUTION))
}

pub fn difference(a: &Geometry, b: &Geometry) -> Geometry {
    let region = Region::from_geometry(a).difference(&Region::from_geometry(b));
    compose(region.to_polygons(DEFAULT_RESOLUTION))
}

pub fn intersection(a: &Geometry, b: &Geometry) -> Geometry {
    let region = Region::from_geometry(a).intersection(&Region::from_geometry(b));
    compose(region.to_polygons(DEFAULT_RESOLUTION))
}

pub(crate) fn check_distance(distance: f64) -> Result<(), OffsetError> {
    if distance.is_finite() {
        Ok(())
    } else {
        Err(OffsetError::InvalidDistance { distance })
    }
}

pub(crate) fn check_resolution(resolution: usize) -> Result<(), OffsetError> {
    if resolution == 0 {
        Err(OffsetError::InvalidResolution { resolution })
    } else {
        Ok(())
    }
}

fn ring_to_pline(ring: &LinearRing, orientation: PlineOrientation) -> Option<Pline<f64>> {
    if ring.len() < 3 {
        return None;
    }
    let mut pline = Pline::new();
    for p in &ring.points {
        pline.add_vertex(PlineVertex::new(p.x, p.y, 0.0));
    }
    pline.set_is_closed(true);
    if pline.orientation() != orientation {
        pline.invert_direction_mut();
    }
    Some(pline)
}

fn flatten_pline(pline: &Pline<f64>, resolution: usize) -> LinearRing {
    let n = pline.vertex_count();
    let mut points = Vec::with_capacity(n);
    for i in 0..n {
        let v1 = pline.at(i);
        points.push(Point::new(v1.x, v1.y));
        if v1.bulge_is_zero() {
            continue;
        }

        let v2 = pline.at((i + 1) % n);
        let (radius, center) = seg_arc_radius_and_center(v1, v2);
        let sweep = angle_from_bulge(v1.bulge);
        let start = (v1.y - center.y).atan2(v1.x - center.x);
        let steps = ((sweep.abs() / FRAC_PI_2) * resolution as f64 - 1e-9)
            .ceil()
            .max(1.0) as usize;
        for k in 1..steps {
            let a = start + sweep * k as f64 / steps as f64;
            points.push(Point::new(
                center.x + radius * a.cos(),
                center.y + radius * a.sin(),
            ));
        }
    }
    LinearRing::new(points)
}

// Hole vertices may sit exactly on the exterior after an offset, where the
// ray cast can answer either way, so any vertex inside is enough.
fn encloses(exterior: &LinearRing, hole: &LinearRing) -> bool {
    hole.points.iter().any(|p| exterior.contains(p))
}

fn signed_offset_for(pline: &Pline<f64>, abs: f64, inward: bool) -> f64 {
    match pline.orientation() {
        PlineOrientation::Clockwise => {
            if inward {
                -abs
            } else {
                abs
            }
        }
        _ => {
            if inward {
                abs
            } else {
                -abs
            }
        }
    }
}

/// Pairwise union until no two boundaries overlap. Returns the merged
/// boundaries and any holes the merges produced.
fn merge_plines(mut plines: Vec<Pline<f64>>) -> (Vec<Pline<f64>>, Vec<Pline<f64>>) {
    plines.retain(|p| p.is_closed() && p.vertex_count() >= 2);
    let mut holes = Vec::new();

    let mut i = 0usize;
    while i < plines.len() {
        let mut merged = false;
        for j in (i + 1)..plines.len() {
            let res = plines[i].boolean(&plines[j], BooleanOp::Or);
            if matches!(
                res.result_info,
                BooleanResultInfo::Disjoint | BooleanResultInfo::InvalidInput
            ) {
                continue;
            }

            let mut next: Vec<Pline<f64>> =
                res.pos_plines.into_iter().map(|p| simplify(p.pline)).collect();
            holes.extend(res.neg_plines.into_iter().map(|p| simplify(p.pline)));
            plines.swap_remove(j);
            plines.swap_remove(i);
            plines.append(&mut next);
            merged = true;
            break;
        }
        if merged {
            i = 0;
        } else {
            i += 1;
        }
    }
    (plines, holes)
}

fn normalize_winding(plines: Vec<Pline<f64>>, desired: PlineOrientation) -> Vec<Pline<f64>> {
    plines
        .into_iter()
        .map(|mut pl| {
            let orientation = pl.orientation();
            if orientation != PlineOrientation::Open && orientation != desired {
                pl.invert_direction_mut();
            }
            pl
        })
        .collect()
}

fn simplify(p: Pline<f64>) -> Pline<f64> {
    p.remove_redundant(REDUNDANT_EPS).unwrap_or(p)
}
