//! Error types for multitimer-core.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading or saving the timer config store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read timer store {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write timer store {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid timer store {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode timer configs: {0}")]
    Encode(#[source] serde_json::Error),

    /// The platform config directory could not be determined.
    #[error("no usable config directory for the timer store")]
    NoConfigDir,
}

/// Errors from parsing a human duration string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseDurationError {
    /// A `:` was present but the input was not exactly two fields.
    #[error("invalid format, use MM:SS")]
    Format,

    /// A field was not a valid integer.
    #[error("invalid number in duration")]
    Number,

    /// The fields summed to a negative total.
    #[error("duration must not be negative")]
    Negative,

    /// The total in seconds does not fit a 64-bit count.
    #[error("duration too large")]
    Overflow,
}
