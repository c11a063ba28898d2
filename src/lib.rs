//! # kerfkit
//!
//! A 2D geometry toolkit that turns parametric curves and simple primitives
//! into closed, orientation-correct shapes for vector rendering and laser
//! cutting.
//!
//! ## Architecture
//!
//! kerfkit is organized as a workspace:
//!
//! 1. **kerfkit-core** - Error taxonomy and toolkit configuration
//! 2. **kerfkit-geometry** - Shapes, Bézier flattening, corner rounding,
//!    composition, path emission and stroke text
//! 3. **kerfkit** - This crate: re-exports and logging setup
//!
//! ## Features
//!
//! - **Curves**: Bézier curves of any degree, flattened and simplified to a
//!   tolerance
//! - **Rounding**: convex (positive radius) or concave (negative radius)
//!   corner rounding through offsetting
//! - **Composition**: any mix of shapes and nested collections reduced to
//!   one canonical value
//! - **Emission**: move/line/close operations with exteriors
//!   counter-clockwise and holes clockwise, into a recorder, SVG path data
//!   or a lyon path
//! - **Text**: single-stroke fonts from glyph tables or Hershey JHF data

pub use kerfkit_core::{
    config, error, ConfigError, Error, FontError, OffsetError, Result, RoundingSettings,
    TessellationError, TextSettings, ToolkitConfig, DEFAULT_TOLERANCE,
};

pub use kerfkit_geometry::{
    bezier, binomial, compose, emit, engine, model, rounding, simplify, text,
};

pub use kerfkit_geometry::{
    buffer, draw, draw_geometry, flatten, round, BinomialCache, FontLibrary, Geometry,
    GeometryKind, GlyphPath, HAlign, LinearRing, LyonPathSink, PathCommand, PathCommands,
    PathSink, Point, Polygon, Polyline, Region, RoundingOptions, StrokeFont, SvgPathData,
    Tessellator, TextOptions, VAlign, Winding,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support, INFO by default
///
/// Fails if a global subscriber is already installed.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let env_filter = log_filter(std::env::var("RUST_LOG").ok());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

// RUST_LOG directives as given, or INFO when unset or unparsable
fn log_filter(directives: Option<String>) -> tracing_subscriber::EnvFilter {
    use tracing_subscriber::EnvFilter;

    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Loads and validates a configuration file, falling back to defaults when
/// `path` is `None`.
pub fn load_config(path: Option<&std::path::Path>) -> Result<ToolkitConfig> {
    let config = match path {
        Some(path) => ToolkitConfig::load_from_file(path)?,
        None => ToolkitConfig::default(),
    };
    config.validate()?;
    tracing::debug!("Using tolerance {}", config.tolerance);
    Ok(config)
}
