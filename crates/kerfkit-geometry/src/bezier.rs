//! Bézier curve tessellation.
//!
//! Curves of any degree are flattened by sampling the Bernstein form at
//! evenly spaced parameters, with the sample count derived from the size of
//! the control polygon and the requested tolerance. The sampled chain is then
//! simplified with the same tolerance so near-straight curves stay small.

use std::sync::Arc;

use kerfkit_core::TessellationError;
use tracing::trace;

use crate::binomial::BinomialCache;
use crate::model::{Point, Polyline};
use crate::simplify::simplify_points;

/// Lower bound on samples for a curved (3+ control point) input.
pub const MIN_SAMPLES: usize = 8;

/// Upper bound on samples; huge curves or tiny tolerances are clamped here.
pub const MAX_SAMPLES: usize = 1 << 20;

#[derive(Debug, Clone)]
pub struct Tessellator {
    cache: Arc<BinomialCache>,
}

impl Default for Tessellator {
    fn default() -> Self {
        Self::new(BinomialCache::shared())
    }
}

impl Tessellator {
    pub fn new(cache: Arc<BinomialCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<BinomialCache> {
        &self.cache
    }

    /// Flattens the curve defined by `points` into a simplified polyline.
    ///
    /// The output always starts and ends exactly at the first and last
    /// control points and has at least two points.
    pub fn bezier(&self, points: &[Point], tolerance: f64) -> Result<Polyline, TessellationError> {
        if points.is_empty() {
            return Err(TessellationError::NoControlPoints);
        }
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(TessellationError::InvalidTolerance { tolerance });
        }

        let first = points[0];
        let last = points[points.len() - 1];
        if points.len() <= 2 {
            return Ok(Polyline::new(vec![first, last]));
        }

        let npoints = sample_count(points, tolerance);
        let coefs = self.cache.row(points.len());
        let degree = points.len() - 1;

        let mut samples = Vec::with_capacity(npoints + 1);
        samples.push(first);
        for i in 1..npoints {
            let t = i as f64 / npoints as f64;
            samples.push(evaluate(points, &coefs, degree, t));
        }
        samples.push(last);

        let simplified = simplify_points(&samples, tolerance);
        trace!(
            "Tessellated degree {} curve: {} samples, {} after simplification",
            degree,
            samples.len(),
            simplified.len()
        );
        Ok(Polyline::new(simplified))
    }
}

/// Flattens a Bézier curve using the process-wide coefficient cache.
pub fn bezier(points: &[Point], tolerance: f64) -> Result<Polyline, TessellationError> {
    Tessellator::default().bezier(points, tolerance)
}

/// Number of parameter steps: `max(8, ceil(diagonal / tolerance))` clamped
/// to [`MAX_SAMPLES`], or the control point count itself for straight
/// segments.
pub fn sample_count(points: &[Point], tolerance: f64) -> usize {
    if points.len() <= 2 {
        return points.len();
    }

    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    let diagonal = (max_x - min_x).hypot(max_y - min_y);

    let steps = (diagonal / tolerance).ceil();
    if steps < MAX_SAMPLES as f64 {
        MIN_SAMPLES.max(steps as usize)
    } else {
        MAX_SAMPLES
    }
}

fn evaluate(points: &[Point], coefs: &[f64], degree: usize, t: f64) -> Point {
    let mt = 1.0 - t;
    let mut x = 0.0;
    let mut y = 0.0;
    for (k, (p, c)) in points.iter().zip(coefs).enumerate() {
        let w = c * mt.powi((degree - k) as i32) * t.powi(k as i32);
        x += w * p.x;
        y += w * p.y;
    }
    Point::new(x, y)
}
