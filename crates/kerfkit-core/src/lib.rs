//! # kerfkit Core
//!
//! Core types shared by the kerfkit crates: the error taxonomy and the
//! toolkit configuration.

pub mod config;
pub mod error;

pub use config::{RoundingSettings, TextSettings, ToolkitConfig, DEFAULT_TOLERANCE};
pub use error::{ConfigError, Error, FontError, OffsetError, Result, TessellationError};
