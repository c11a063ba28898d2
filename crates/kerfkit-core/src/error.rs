//! Error handling for kerfkit
//!
//! Provides error types for every layer of the toolkit:
//! - Tessellation errors (Bézier flattening preconditions)
//! - Offset errors (buffering and corner rounding parameters)
//! - Font errors (stroke-font tables and lookups)
//! - Configuration errors (loading and validation)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Tessellation error type
///
/// Raised when a Bézier control polygon or its flattening parameters
/// violate the tessellator's preconditions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TessellationError {
    /// No control points were supplied
    #[error("Bezier curve needs at least one control point")]
    NoControlPoints,

    /// Tolerance is zero, negative or not finite
    #[error("Invalid tessellation tolerance: {tolerance}")]
    InvalidTolerance {
        /// The rejected tolerance.
        tolerance: f64,
    },
}

/// Offset error type
///
/// Represents invalid parameters handed to buffering and rounding.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OffsetError {
    /// Tolerance is zero, negative or not finite
    #[error("Invalid offset tolerance: {tolerance}")]
    InvalidTolerance {
        /// The rejected tolerance.
        tolerance: f64,
    },

    /// Arc resolution must be at least one segment per quarter circle
    #[error("Invalid arc resolution: {resolution}")]
    InvalidResolution {
        /// The rejected resolution.
        resolution: usize,
    },

    /// Offset distance is not finite
    #[error("Invalid offset distance: {distance}")]
    InvalidDistance {
        /// The rejected distance.
        distance: f64,
    },
}

/// Font error type
///
/// Represents errors related to stroke-font tables and font lookup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FontError {
    /// No font registered under the requested name
    #[error("Unknown font: {name}")]
    UnknownFont {
        /// The requested font name.
        name: String,
    },

    /// A glyph entry could not be decoded
    #[error("Malformed glyph {index}: {reason}")]
    MalformedGlyph {
        /// Index of the glyph in the table (character code minus 32).
        index: usize,
        /// Why the entry was rejected.
        reason: String,
    },

    /// The table covers more than the printable ASCII range
    #[error("Glyph table has {count} entries, at most 95 are supported")]
    TooManyGlyphs {
        /// Number of entries in the rejected table.
        count: usize,
    },
}

/// Configuration error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A configuration value is out of range
    #[error("Invalid setting '{key}': {reason}")]
    InvalidValue {
        /// Dotted path of the offending setting.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The file extension does not name a supported format
    #[error("Config file must be .json or .toml: {path}")]
    UnsupportedFormat {
        /// The rejected path.
        path: String,
    },
}

/// Main error type for kerfkit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Tessellation error
    #[error(transparent)]
    Tessellation(#[from] TessellationError),

    /// Offset error
    #[error(transparent)]
    Offset(#[from] OffsetError),

    /// Font error
    #[error(transparent)]
    Font(#[from] FontError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error("TOML error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a tessellation error
    pub fn is_tessellation_error(&self) -> bool {
        matches!(self, Error::Tessellation(_))
    }

    /// Check if this is an offset error
    pub fn is_offset_error(&self) -> bool {
        matches!(self, Error::Offset(_))
    }

    /// Check if this is a font error
    pub fn is_font_error(&self) -> bool {
        matches!(self, Error::Font(_))
    }

    /// Check if this is a configuration error, including file format errors
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Error::Config(_) | Error::Json(_) | Error::TomlDe(_) | Error::TomlSer(_)
        )
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
