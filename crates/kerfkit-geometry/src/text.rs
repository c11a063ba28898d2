//! Single-stroke text.
//!
//! A [`StrokeFont`] holds up to 95 glyphs for the printable ASCII range,
//! starting at the space character. Each glyph is a set of open pen strokes
//! in font units with `y` growing downwards, plus left and right bearings
//! that place it on the baseline run. Rendering lays the glyphs out along
//! the pen, aligns the run, then scales and places it.
//!
//! Glyph entries use the compact text form
//! `"<left> <right> M x y L x y ... M x y L x y"`, where `M` lifts the pen
//! and any other command draws to the point. Hershey JHF data can be
//! loaded directly with [`StrokeFont::from_jhf`].

use std::collections::HashMap;

use kerfkit_core::{FontError, ToolkitConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::compose::compose;
use crate::model::{Geometry, Point, Polyline};

/// Pen advance for an unknown character is twice this, in font units.
pub const MISSING_GLYPH_SPACING: f64 = 8.0;

/// Nominal cap-to-descender height of Hershey fonts, in font units.
pub const HERSHEY_HEIGHT: f64 = 21.0;

/// Printable ASCII, space through tilde.
pub const MAX_GLYPHS: usize = 95;

const FIRST_CHAR: u32 = 32;

#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub left: f64,
    pub right: f64,
    pub strokes: Vec<Vec<Point>>,
}

impl Glyph {
    /// Decodes one entry of a glyph table. `index` is only used in errors.
    pub fn parse(index: usize, entry: &str) -> Result<Glyph, FontError> {
        let malformed = |reason: String| FontError::MalformedGlyph { index, reason };

        let tokens: Vec<&str> = entry.split_whitespace().collect();
        if tokens.len() < 2 {
            return Err(malformed("missing left/right bearings".to_string()));
        }
        let number = |token: &str| {
            token
                .parse::<f64>()
                .map_err(|_| malformed(format!("'{}' is not a number", token)))
        };

        let left = number(tokens[0])?;
        let right = number(tokens[1])?;
        let commands = &tokens[2..];
        if commands.len() % 3 != 0 {
            return Err(malformed(format!(
                "{} tokens after the bearings, expected (command, x, y) triples",
                commands.len()
            )));
        }

        let mut strokes: Vec<Vec<Point>> = Vec::new();
        for triple in commands.chunks(3) {
            let p = Point::new(number(triple[1])?, number(triple[2])?);
            match strokes.last_mut() {
                Some(stroke) if triple[0] != "M" => stroke.push(p),
                _ => strokes.push(vec![p]),
            }
        }

        Ok(Glyph {
            left,
            right,
            strokes,
        })
    }

    pub fn advance(&self) -> f64 {
        self.right - self.left
    }
}

/// Horizontal anchor of the rendered run relative to the placement point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HAlign {
    /// Run starts at the anchor.
    Left,
    #[default]
    Center,
    /// Run ends at the anchor.
    Right,
}

impl HAlign {
    pub fn factor(self) -> f64 {
        match self {
            HAlign::Left => 1.0,
            HAlign::Center => 0.0,
            HAlign::Right => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VAlign {
    Top,
    #[default]
    Center,
    Bottom,
}

impl VAlign {
    pub fn factor(self) -> f64 {
        match self {
            VAlign::Top => 1.0,
            VAlign::Center => 0.0,
            VAlign::Bottom => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextOptions {
    pub scale: f64,
    pub offset: Point,
    pub align: HAlign,
    pub valign: VAlign,
    pub missing_glyph_spacing: f64,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Point::new(0.0, 0.0),
            align: HAlign::default(),
            valign: VAlign::default(),
            missing_glyph_spacing: MISSING_GLYPH_SPACING,
        }
    }
}

impl TextOptions {
    pub fn from_config(config: &ToolkitConfig) -> Self {
        Self {
            missing_glyph_spacing: config.text.missing_glyph_spacing,
            ..Default::default()
        }
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn offset(mut self, x: f64, y: f64) -> Self {
        self.offset = Point::new(x, y);
        self
    }

    pub fn align(mut self, align: HAlign, valign: VAlign) -> Self {
        self.align = align;
        self.valign = valign;
        self
    }
}

/// Strokes for one rendered string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphPath {
    /// One open polyline per pen-down stroke.
    pub strokes: Vec<Polyline>,
    /// Total pen advance in font units, before scaling.
    pub advance: f64,
    /// Characters the font could not draw, in order of appearance.
    pub skipped: Vec<char>,
}

impl GlyphPath {
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn into_geometry(self) -> Geometry {
        compose(self.strokes)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrokeFont {
    name: String,
    glyphs: Vec<Glyph>,
    height: f64,
}

impl StrokeFont {
    pub fn new(name: impl Into<String>, glyphs: Vec<Glyph>) -> Result<Self, FontError> {
        if glyphs.len() > MAX_GLYPHS {
            return Err(FontError::TooManyGlyphs {
                count: glyphs.len(),
            });
        }
        Ok(Self {
            name: name.into(),
            glyphs,
            height: HERSHEY_HEIGHT,
        })
    }

    /// Builds a font from text entries, the first one being the space.
    pub fn from_entries<S: AsRef<str>>(name: impl Into<String>, entries: &[S]) -> Result<Self, FontError> {
        if entries.len() > MAX_GLYPHS {
            return Err(FontError::TooManyGlyphs {
                count: entries.len(),
            });
        }
        let glyphs = entries
            .iter()
            .enumerate()
            .map(|(i, e)| Glyph::parse(i, e.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(name, glyphs)
    }

    /// Parses Hershey JHF text. Records are taken in order, the first one
    /// being the space; records wrapped over several lines are joined.
    pub fn from_jhf(name: impl Into<String>, content: &str) -> Result<Self, FontError> {
        let mut glyphs = Vec::new();
        let mut lines = content.lines().filter(|l| !l.trim().is_empty());

        while let Some(line) = lines.next() {
            let index = glyphs.len();
            let malformed = |reason: &str| FontError::MalformedGlyph {
                index,
                reason: reason.to_string(),
            };

            // columns: 0..5 glyph id, 5..8 vertex count, then bearings and pairs
            let mut record = line.trim_end().to_string();
            let count: usize = record
                .get(5..8)
                .and_then(|s| s.trim().parse().ok())
                .ok_or_else(|| malformed("missing vertex count"))?;
            let wanted = 8 + 2 * count;
            while record.len() < wanted {
                match lines.next() {
                    Some(more) => record.push_str(more.trim_end()),
                    None => return Err(malformed("record ends early")),
                }
            }

            let data = record
                .get(8..wanted)
                .ok_or_else(|| malformed("record is not ASCII"))?
                .as_bytes();
            glyphs.push(jhf_glyph(data));
        }

        debug!("Parsed {} JHF glyphs", glyphs.len());
        Self::new(name, glyphs)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Overrides the nominal height used for vertical alignment.
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    pub fn glyph(&self, c: char) -> Option<&Glyph> {
        let index = (c as u32).checked_sub(FIRST_CHAR)? as usize;
        self.glyphs.get(index)
    }

    pub fn render(&self, text: &str, options: &TextOptions) -> GlyphPath {
        let mut strokes: Vec<Vec<Point>> = Vec::new();
        let mut skipped = Vec::new();
        let mut pen_x = 0.0;

        for c in text.chars() {
            match self.glyph(c) {
                Some(glyph) => {
                    let origin = pen_x - glyph.left;
                    strokes.extend(glyph.strokes.iter().filter(|s| s.len() >= 2).map(|s| {
                        s.iter().map(|p| Point::new(p.x + origin, p.y)).collect()
                    }));
                    pen_x += glyph.advance();
                }
                None => {
                    warn!("Font '{}' has no glyph for {:?}, skipping", self.name, c);
                    skipped.push(c);
                    pen_x += 2.0 * options.missing_glyph_spacing;
                }
            }
        }

        let dx = -0.5 * (1.0 - options.align.factor()) * pen_x;
        let dy = 0.5 * options.valign.factor() * self.height;
        let place = |p: &Point| {
            Point::new(
                (p.x + dx) * options.scale + options.offset.x,
                (p.y + dy) * options.scale + options.offset.y,
            )
        };

        GlyphPath {
            strokes: strokes
                .iter()
                .map(|s| Polyline::new(s.iter().map(&place).collect()))
                .collect(),
            advance: pen_x,
            skipped,
        }
    }
}

// Bearings then coordinate pairs, each coordinate offset from 'R';
// " R" lifts the pen.
fn jhf_glyph(data: &[u8]) -> Glyph {
    let coord = |b: u8| f64::from(b) - f64::from(b'R');
    let mut pairs = data.chunks_exact(2);

    let (left, right) = match pairs.next() {
        Some(b) => (coord(b[0]), coord(b[1])),
        None => (0.0, 0.0),
    };

    let mut strokes: Vec<Vec<Point>> = Vec::new();
    let mut pen_down = false;
    for pair in pairs {
        if pair == b" R" {
            pen_down = false;
            continue;
        }
        let p = Point::new(coord(pair[0]), coord(pair[1]));
        match strokes.last_mut() {
            Some(stroke) if pen_down => stroke.push(p),
            _ => strokes.push(vec![p]),
        }
        pen_down = true;
    }

    Glyph {
        left,
        right,
        strokes,
    }
}

/// Fonts by name.
#[derive(Debug, Clone, Default)]
pub struct FontLibrary {
    fonts: HashMap<String, StrokeFont>,
}

impl FontLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `font` under its own name, replacing any previous one.
    pub fn insert(&mut self, font: StrokeFont) -> Option<StrokeFont> {
        self.fonts.insert(font.name.clone(), font)
    }

    pub fn get(&self, name: &str) -> Option<&StrokeFont> {
        self.fonts.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fonts.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fonts.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn render(&self, name: &str, text: &str, options: &TextOptions) -> Result<GlyphPath, FontError> {
        let font = self.get(name).ok_or_else(|| FontError::UnknownFont {
            name: name.to_string(),
        })?;
        Ok(font.render(text, options))
    }

    /// Renders with the configured default font and spacing.
    pub fn render_default(&self, config: &ToolkitConfig, text: &str) -> Result<GlyphPath, FontError> {
        self.render(&config.text.default_font, text, &TextOptions::from_config(config))
    }
}
