//! Error types for contact export ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a contact export.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Export file not found.
    #[error("contact export not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read or parse the CSV.
    #[error("failed to read contact export {path}: {source}")]
    CsvRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Required column not present in the header row.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: &'static str, path: PathBuf },

    /// The phone type cell is empty or not a known type.
    #[error("invalid phone type '{value}' on line {line} of {path}")]
    InvalidType {
        value: String,
        line: u64,
        path: PathBuf,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
