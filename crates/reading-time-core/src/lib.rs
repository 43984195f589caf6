//! Core library for reading-time.
//!
//! Estimates how long a document takes to read. Documents may be plain text
//! or HTML; markup, comments and script/style contents never count as words.
//!
//! # Modules
//!
//! - [`estimate`] - Word and image counting, reading-time calculation
//! - [`html`] - Markup scanning and entity decoding
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use reading_time_core::{EstimateConfig, estimate};
//!
//! let report = estimate("<p>one two</p> three", &EstimateConfig::default()).unwrap();
//! assert_eq!(report.words, 3);
//! assert_eq!(report.formatted, "1 minute to read");
//! ```
#![deny(unsafe_code)]

pub mod config;

pub mod error;

pub mod estimate;

pub mod html;

pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};

pub use error::{ConfigError, ConfigResult, EstimateError, EstimateResult};

pub use estimate::{
    Estimate, EstimateConfig, ReadingTime, ReadingTimeBuilder, Rounding, calc_reading_time,
    estimate, format_reading_time, image_seconds, img_count, reading_seconds, word_count,
};

/// Default maximum input size for the CLI (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
