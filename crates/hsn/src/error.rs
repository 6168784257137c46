//! Error types for the HSN library.
//!
//! Only reference loading and configuration fail hard. Per-code validation
//! problems are values ([`crate::validation::CodeError`]), not errors.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for HSN operations.
#[derive(Debug, Error)]
pub enum HsnError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row of the reference source could not be interpreted.
    #[error("Parse error at row {row}: {message}")]
    Parse { row: usize, message: String },

    /// A code cell is not 2, 4, 6 or 8 digits.
    #[error("Invalid code '{code}' at row {row}: expected 2, 4, 6 or 8 digits")]
    InvalidCode { row: usize, code: String },

    /// The same code appears twice with different descriptions.
    #[error("Duplicate code '{code}' with conflicting descriptions: '{first}' vs '{second}'")]
    DuplicateCode {
        code: String,
        first: String,
        second: String,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no data rows.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for HSN operations.
pub type Result<T> = std::result::Result<T, HsnError>;
