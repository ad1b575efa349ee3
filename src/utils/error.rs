//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a database
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP request failed: {0}")]
    FetchFailed(#[from] reqwest::Error),

    #[error("HTTP {status} while fetching {url}")]
    BadStatus { url: String, status: u16 },

    #[error("Malformed table: {0}")]
    MalformedTable(String),

    #[error("Table is not valid JSON: {0}")]
    TableJson(#[from] serde_json::Error),

    #[error("Invalid timestamp on line {line}: {value:?}")]
    InvalidTimestamp { line: usize, value: String },
}

/// Errors that can occur while computing a statistic
///
/// These are local to the statistic requested; callers can keep
/// computing the others.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("Database is empty")]
    EmptyDatabase,

    #[error("Need at least {required} transactions, found {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Database contains no items")]
    NoItems,

    #[error("Presence matrix is empty ({rows} x {cols})")]
    EmptyMatrix { rows: usize, cols: usize },

    #[error("Database carries no timestamps")]
    NoTimestamps,

    #[error("Timestamp range 1..={max} exceeds the limit of {limit}")]
    TimestampRangeTooLarge { max: u64, limit: u64 },

    #[error("Timestamp {current} at transaction {index} precedes {previous}")]
    UnorderedTimestamps {
        index: usize,
        previous: u64,
        current: u64,
    },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
