//! Error types for the data-loader crate.
//!
//! Loading fails loudly: a missing column or a row without a name field is an
//! error, never a silently skipped record.

use thiserror::Error;

/// Errors that can occur while loading and parsing movie records
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in a CSV file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// The CSV header lacks a column every record needs
    #[error("Missing required column '{column}' in {file}")]
    MissingColumn { file: String, column: String },

    /// JSON input was not an array of movie records
    #[error("Invalid JSON input: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Two records share the same id
    #[error("Duplicate movie id {id}")]
    DuplicateId { id: u32 },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
