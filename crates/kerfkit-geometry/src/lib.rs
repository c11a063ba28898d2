//! # kerfkit Geometry
//!
//! 2D shape construction for vector output and laser cutting: curve
//! flattening, corner rounding, canonical grouping of shapes, fill-rule-safe
//! path emission, and single-stroke text.
//!
//! ## Core Components
//!
//! - **Model**: points, polylines, rings, polygons and the [`Geometry`] sum
//!   type covering atoms, multi containers and nested collections
//! - **Tessellator**: Bézier curves of any degree to simplified polylines,
//!   backed by a shared [`BinomialCache`]
//! - **Rounder**: corner rounding by offsetting in and back out
//! - **Composer**: flattening and regrouping any mix of shapes into one
//!   canonical value
//! - **Emitter**: move/line/close path operations with exteriors traced
//!   counter-clockwise and holes clockwise
//! - **Text**: stroke-font glyph tables and string layout
//! - **Engine**: offsets and booleans over `cavalier_contours`
//!
//! ## Architecture
//!
//! ```text
//! control points ─> Tessellator ─┐
//! rectangles ─────> Rounder ─────┼─> Composer ─> Emitter ─> PathSink
//! strings ────────> Text ────────┘
//!                      Rounder ─> Engine (offset)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use kerfkit_geometry::{bezier, compose, draw, round, Point, RoundingOptions};
//! use kerfkit_geometry::model::rect;
//!
//! let curve = bezier(
//!     &[
//!         Point::new(0.0, 0.0),
//!         Point::new(0.0, 10.0),
//!         Point::new(10.0, 10.0),
//!         Point::new(10.0, 0.0),
//!     ],
//!     0.1,
//! )?;
//! let piece = round(&rect((0.0, 20.0), (0.0, 20.0)).into(), 2.0, &RoundingOptions::default())?;
//!
//! let drawing = compose!(curve, piece);
//! let commands = draw(&drawing);
//! assert_eq!(commands.subpath_count(), 2);
//! # Ok::<(), kerfkit_core::Error>(())
//! ```

pub mod binomial;
pub mod bezier;
pub mod compose;
pub mod emit;
pub mod engine;
pub mod model;
pub mod rounding;
pub mod simplify;
pub mod text;

pub use bezier::{bezier, Tessellator};
pub use binomial::BinomialCache;
pub use compose::{compose, flatten};
pub use emit::{draw, draw_geometry, LyonPathSink, PathCommand, PathCommands, PathSink, SvgPathData};
pub use engine::{buffer, Region};
pub use model::{Geometry, GeometryKind, LinearRing, Point, Polygon, Polyline, Winding};
pub use rounding::{round, RoundingOptions};
pub use text::{FontLibrary, GlyphPath, HAlign, StrokeFont, TextOptions, VAlign};
