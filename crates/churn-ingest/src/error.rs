//! Error types for customer upload ingestion.

use std::path::PathBuf;

use churn_model::ModelError;
use thiserror::Error;

/// Errors that can occur while reading an uploaded customer file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Upload file not found.
    #[error("upload file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Format Errors ===
    /// File extension is neither `.csv` nor `.xlsx`.
    #[error("unsupported upload format for {file_name} (expected .csv or .xlsx)")]
    UnsupportedFormat { file_name: String },

    /// CSV file uses an encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {file_name} (UTF-8 required)")]
    UnsupportedEncoding {
        file_name: String,
        encoding: &'static str,
    },

    /// File has no header row.
    #[error("upload is empty: {file_name}")]
    EmptyUpload { file_name: String },

    /// A header cell is blank.
    #[error("empty column name in {file_name}")]
    EmptyColumnName { file_name: String },

    /// The same column name appears twice.
    #[error("duplicate column '{column}' in {file_name}")]
    DuplicateColumn { file_name: String, column: String },

    // === Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {file_name}: {message}")]
    CsvParse { file_name: String, message: String },

    /// Failed to open or read the spreadsheet.
    #[error("failed to parse spreadsheet {file_name}: {message}")]
    XlsxParse { file_name: String, message: String },

    // === Schema Errors ===
    /// Required customer columns are absent.
    #[error("missing required column(s): {}", .missing.join(", "))]
    SchemaMismatch { missing: Vec<String> },

    /// A cell could not be converted into the column's type.
    #[error("row {row}: {source}")]
    InvalidRow {
        row: usize,
        #[source]
        source: ModelError,
    },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::SchemaMismatch {
            missing: vec!["Tenure".to_string(), "Complain".to_string()],
        };
        assert_eq!(err.to_string(), "missing required column(s): Tenure, Complain");
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("test".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }
}
