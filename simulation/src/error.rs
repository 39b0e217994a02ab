//! Error types for the life simulator

use thiserror::Error;

/// Failure while reading a saved character back.
///
/// Always recoverable: the caller decides whether to start a fresh life.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("save file ended before field '{field}'")]
    MissingField { field: &'static str },

    #[error("invalid value for '{field}': {value:?}")]
    InvalidField { field: &'static str, value: String },

    #[error("unknown career ordinal {0}")]
    UnknownCareer(u8),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported export version: {0}")]
    UnsupportedVersion(u8),
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A percentile table that does not cover 1..=100 exactly once.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventTableError {
    #[error("event table has no buckets")]
    Empty,

    #[error("bucket {start}..={end} is inverted or outside 1..=100")]
    InvalidRange { start: u8, end: u8 },

    #[error("gap in event table: expected bucket starting at {expected}, found {found}")]
    Gap { expected: u8, found: u8 },

    #[error("overlapping buckets at roll {0}")]
    Overlap(u8),

    #[error("event table stops at {0}, must reach 100")]
    Incomplete(u8),
}

/// Talent points spent outside the allowed pools.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AllocationError {
    #[error("{attribute} must be at least {min}, got {value}")]
    BelowMinimum {
        attribute: &'static str,
        min: i32,
        value: i32,
    },

    #[error("{pool} pool overspent: {spent} of {available}")]
    PoolExceeded {
        pool: &'static str,
        spent: i32,
        available: i32,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
