//! Drawing geometry onto a path sink with fill-rule-safe ring orientation.
//!
//! Exterior rings are always traced counter-clockwise and holes clockwise,
//! whatever orientation the input was authored in, so both the nonzero and
//! the even-odd fill rules render holes as holes.

use std::fmt::Write as _;

use lyon::math::point;
use lyon::path::Path;

use crate::model::{Geometry, LinearRing, Point, Polygon, Polyline, Winding};

/// Receiver of the three path primitives.
pub trait PathSink {
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn close_path(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    ClosePath,
}

/// Records every operation it receives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathCommands {
    pub commands: Vec<PathCommand>,
}

impl PathCommands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of sub-paths, i.e. move operations.
    pub fn subpath_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PathCommand::MoveTo(_)))
            .count()
    }

    /// Replays the recording into another sink.
    pub fn replay(&self, sink: &mut impl PathSink) {
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => sink.move_to(p),
                PathCommand::LineTo(p) => sink.line_to(p),
                PathCommand::ClosePath => sink.close_path(),
            }
        }
    }
}

impl PathSink for PathCommands {
    fn move_to(&mut self, p: Point) {
        self.commands.push(PathCommand::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.commands.push(PathCommand::LineTo(p));
    }

    fn close_path(&mut self) {
        self.commands.push(PathCommand::ClosePath);
    }
}

/// SVG path data (`d` attribute) text.
#[derive(Debug, Clone)]
pub struct SvgPathData {
    data: String,
    precision: usize,
}

impl Default for SvgPathData {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgPathData {
    pub fn new() -> Self {
        Self::with_precision(2)
    }

    /// Coordinates are written with `precision` fractional digits.
    pub fn with_precision(precision: usize) -> Self {
        Self {
            data: String::new(),
            precision,
        }
    }

    pub fn as_str(&self) -> &str {
        self.data.trim_end()
    }

    pub fn into_string(self) -> String {
        self.as_str().to_string()
    }
}

impl PathSink for SvgPathData {
    fn move_to(&mut self, p: Point) {
        let _ = write!(self.data, "M {:.*} {:.*} ", self.precision, p.x, self.precision, p.y);
    }

    fn line_to(&mut self, p: Point) {
        let _ = write!(self.data, "L {:.*} {:.*} ", self.precision, p.x, self.precision, p.y);
    }

    fn close_path(&mut self) {
        self.data.push_str("Z ");
    }
}

/// Feeds a lyon path builder.
pub struct LyonPathSink {
    builder: lyon::path::path::Builder,
    subpath_active: bool,
}

impl Default for LyonPathSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LyonPathSink {
    pub fn new() -> Self {
        Self {
            builder: Path::builder(),
            subpath_active: false,
        }
    }

    pub fn build(mut self) -> Path {
        if self.subpath_active {
            self.builder.end(false);
        }
        self.builder.build()
    }
}

impl PathSink for LyonPathSink {
    fn move_to(&mut self, p: Point) {
        if self.subpath_active {
            self.builder.end(false);
        }
        self.builder.begin(point(p.x as f32, p.y as f32));
        self.subpath_active = true;
    }

    fn line_to(&mut self, p: Point) {
        let to = point(p.x as f32, p.y as f32);
        if self.subpath_active {
            self.builder.line_to(to);
        } else {
            self.builder.begin(to);
            self.subpath_active = true;
        }
    }

    fn close_path(&mut self) {
        if self.subpath_active {
            self.builder.end(true);
            self.subpath_active = false;
        }
    }
}

/// Emits `geometry` into `sink`, recursing through every container.
/// Points produce nothing.
pub fn draw_geometry(geometry: &Geometry, sink: &mut impl PathSink) {
    match geometry {
        Geometry::Point(_) | Geometry::MultiPoint(_) => {}
        Geometry::Polyline(l) => draw_polyline(l, sink),
        Geometry::Ring(r) => draw_ring(r, Winding::CounterClockwise, sink),
        Geometry::Polygon(p) => draw_polygon(p, sink),
        Geometry::MultiPolyline(v) => v.iter().for_each(|l| draw_polyline(l, sink)),
        Geometry::MultiPolygon(v) => v.iter().for_each(|p| draw_polygon(p, sink)),
        Geometry::Collection(v) => v.iter().for_each(|g| draw_geometry(g, sink)),
    }
}

/// Records the path operations for `geometry`.
pub fn draw(geometry: &Geometry) -> PathCommands {
    let mut commands = PathCommands::new();
    draw_geometry(geometry, &mut commands);
    commands
}

/// SVG path data for `geometry` at two decimal places.
pub fn to_svg_path(geometry: &Geometry) -> String {
    let mut data = SvgPathData::new();
    draw_geometry(geometry, &mut data);
    data.into_string()
}

pub fn to_lyon_path(geometry: &Geometry) -> Path {
    let mut sink = LyonPathSink::new();
    draw_geometry(geometry, &mut sink);
    sink.build()
}

fn draw_polyline(line: &Polyline, sink: &mut impl PathSink) {
    let mut points = line.points.iter();
    if let Some(first) = points.next() {
        sink.move_to(*first);
        for p in points {
            sink.line_to(*p);
        }
    }
}

fn draw_polygon(polygon: &Polygon, sink: &mut impl PathSink) {
    draw_ring(&polygon.exterior, Winding::CounterClockwise, sink);
    for hole in &polygon.holes {
        draw_ring(hole, Winding::Clockwise, sink);
    }
}

fn draw_ring(ring: &LinearRing, winding: Winding, sink: &mut impl PathSink) {
    let ring = ring.oriented(winding);
    let mut points = ring.points.iter();
    if let Some(first) = points.next() {
        sink.move_to(*first);
        for p in points {
            sink.line_to(*p);
        }
        sink.close_path();
    }
}
