//! Error types for reading-time-core.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while estimating reading time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EstimateError {
    /// No document text was supplied.
    #[error("no text supplied to estimate")]
    MissingText,

    /// The words-per-minute rate is not a positive integer.
    #[error("words per minute must be a positive integer, got {0}")]
    InvalidWordsPerMinute(u32),
}

/// Result type alias using [`EstimateError`].
pub type EstimateResult<T> = Result<T, EstimateError>;
