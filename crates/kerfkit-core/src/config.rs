//! Toolkit configuration
//!
//! Defaults for the geometry operations that callers usually want to tune
//! once per project rather than per call:
//! - Linear tolerance used for curve flattening and arc faceting
//! - Minimum arc resolution for corner rounding (general and text contexts)
//! - Stroke-font defaults
//!
//! Configuration can be loaded from and saved to JSON or TOML files.

use crate::error::{ConfigError, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default linear tolerance in drawing units.
pub const DEFAULT_TOLERANCE: f64 = 0.1;

/// Corner rounding settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundingSettings {
    /// Minimum segments per quarter circle for general shapes
    pub min_segments: usize,
    /// Minimum segments per quarter circle next to text, where facets show
    pub text_min_segments: usize,
}

impl Default for RoundingSettings {
    fn default() -> Self {
        Self {
            min_segments: 2,
            text_min_segments: 16,
        }
    }
}

/// Stroke text settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSettings {
    /// Font used when a caller does not name one
    pub default_font: String,
    /// Base spacing in font units; a missing glyph advances the pen by twice this
    pub missing_glyph_spacing: f64,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            default_font: "futural".to_string(),
            missing_glyph_spacing: 8.0,
        }
    }
}

/// Top-level toolkit configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    /// Linear tolerance for flattening and faceting
    pub tolerance: f64,
    /// Corner rounding settings
    pub rounding: RoundingSettings,
    /// Stroke text settings
    pub text: TextSettings,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            rounding: RoundingSettings::default(),
            text: TextSettings::default(),
        }
    }
}

impl ToolkitConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded toolkit config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(invalid("tolerance", "must be a positive number"));
        }

        if self.rounding.min_segments == 0 {
            return Err(invalid("rounding.min_segments", "must be > 0"));
        }

        if self.rounding.text_min_segments == 0 {
            return Err(invalid("rounding.text_min_segments", "must be > 0"));
        }

        if self.text.default_font.trim().is_empty() {
            return Err(invalid("text.default_font", "must not be empty"));
        }

        if !(self.text.missing_glyph_spacing.is_finite() && self.text.missing_glyph_spacing > 0.0)
        {
            return Err(invalid(
                "text.missing_glyph_spacing",
                "must be a positive number",
            ));
        }

        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.display().to_string(),
            }
            .into()),
        }
    }
}

fn invalid(key: &str, reason: &str) -> Error {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
    .into()
}
