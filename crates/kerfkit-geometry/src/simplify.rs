//! Polyline simplification (Ramer–Douglas–Peucker).

use crate::model::{Point, Polyline};

/// Drops points whose distance to the simplified chord is within
/// `tolerance`. The first and last points are always kept.
pub fn simplify_polyline(line: &Polyline, tolerance: f64) -> Polyline {
    Polyline::new(simplify_points(&line.points, tolerance))
}

pub fn simplify_points(points: &[Point], tolerance: f64) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;

    // explicit stack keeps deep curves from recursing
    let mut stack = vec![(0usize, points.len() - 1)];
    let tol2 = tolerance * tolerance;

    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }

        let mut max_d2 = 0.0;
        let mut index = start;
        for i in (start + 1)..end {
            let d2 = segment_distance_sq(points[i], points[start], points[end]);
            if d2 > max_d2 {
                max_d2 = d2;
                index = i;
            }
        }

        if max_d2 > tol2 {
            keep[index] = true;
            stack.push((start, index));
            stack.push((index, end));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}

fn segment_distance_sq(p: Point, a: Point, b: Point) -> f64 {
    let vx = b.x - a.x;
    let vy = b.y - a.y;
    let wx = p.x - a.x;
    let wy = p.y - a.y;
    let vv = vx * vx + vy * vy;
    if vv == 0.0 {
        return wx * wx + wy * wy;
    }
    let t = ((wx * vx + wy * vy) / vv).clamp(0.0, 1.0);
    let dx = p.x - (a.x + t * vx);
    let dy = p.y - (a.y + t * vy);
    dx * dx + dy * dy
}
