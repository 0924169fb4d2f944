//! Error types for program table ingestion.

use std::path::PathBuf;

use hours_model::InputSchemaError;
use thiserror::Error;

/// Errors that stop the batch before any program is processed.
#[derive(Debug, Error)]
pub enum IngestError {
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open or read the file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV (bad quoting, invalid UTF-8).
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The table does not satisfy the program input schema.
    #[error(transparent)]
    Schema(#[from] InputSchemaError),
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
