//! Corner rounding by morphological opening and closing.
//!
//! A positive radius shrinks the shape by the radius and grows it back,
//! which rounds convex corners. A negative radius grows first and shrinks
//! after, which rounds concave corners. Features narrower than twice the
//! radius disappear under a positive radius.

use std::f64::consts::PI;

use kerfkit_core::{OffsetError, ToolkitConfig, DEFAULT_TOLERANCE};
use tracing::debug;

use crate::compose::compose;
use crate::engine::{
    check_distance, check_resolution, components, flatten_components, offset_components,
};
use crate::model::Geometry;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundingOptions {
    /// Largest allowed deviation of a flattened arc from the true circle.
    pub tolerance: f64,
    /// Floor on segments per quarter circle.
    pub min_segments: usize,
}

impl Default for RoundingOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            min_segments: 2,
        }
    }
}

impl RoundingOptions {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Default::default()
        }
    }

    pub fn with_min_segments(mut self, min_segments: usize) -> Self {
        self.min_segments = min_segments;
        self
    }

    pub fn from_config(config: &ToolkitConfig) -> Self {
        Self {
            tolerance: config.tolerance,
            min_segments: config.rounding.min_segments,
        }
    }

    /// Options for outlines that sit next to lettering, where a coarse arc
    /// shows.
    pub fn for_text(config: &ToolkitConfig) -> Self {
        Self {
            tolerance: config.tolerance,
            min_segments: config.rounding.text_min_segments,
        }
    }

    pub fn resolution(&self, radius: f64) -> usize {
        resolution(radius, self.tolerance, self.min_segments)
    }
}

/// Segments per quarter circle for an arc of `radius`:
/// `max(min_segments, ceil(2π|radius| / tolerance / 4))`.
pub fn resolution(radius: f64, tolerance: f64, min_segments: usize) -> usize {
    let segments = (2.0 * PI * radius.abs() / tolerance / 4.0).ceil();
    min_segments.max(segments as usize)
}

/// Rounds the corners of the area covered by `geometry` by `radius`.
///
/// Overlapping polygons are treated as one shape, and a negative radius
/// bridges gaps narrower than twice its size. Points and polylines are
/// ignored. The result is canonical: a polygon, a multipolygon, or an empty
/// collection when nothing survives.
pub fn round(geometry: &Geometry, radius: f64, options: &RoundingOptions) -> Result<Geometry, OffsetError> {
    if !(options.tolerance.is_finite() && options.tolerance > 0.0) {
        return Err(OffsetError::InvalidTolerance {
            tolerance: options.tolerance,
        });
    }
    check_distance(radius)?;
    check_resolution(options.min_segments)?;

    let polygons = geometry.polygons();
    let ignored = geometry.atoms().len() - polygons.len();
    if ignored > 0 {
        debug!("Rounding ignores {} non-polygonal atoms", ignored);
    }

    if radius == 0.0 {
        return Ok(compose(polygons.into_iter().cloned()));
    }

    // shrink first for convex corners, grow first for concave ones
    let resolution = options.resolution(radius);
    let first = offset_components(&components(geometry), -radius);
    let second = offset_components(&first, radius);
    let rounded = flatten_components(&second, resolution);

    debug!(
        "Rounded corners by {} at {} segments per quarter circle: {} polygons out",
        radius,
        resolution,
        rounded.len()
    );
    Ok(compose(rounded))
}
