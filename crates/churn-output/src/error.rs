//! Error types for result export.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building or writing the result workbook.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Number of prediction outputs differs from the number of table rows.
    #[error("prediction count mismatch: {rows} row(s) but {outputs} output(s)")]
    LengthMismatch { rows: usize, outputs: usize },

    /// Table does not fit in a single worksheet.
    #[error("table too large for one worksheet: {rows} row(s) x {columns} column(s)")]
    TooLarge { rows: usize, columns: usize },

    /// Workbook generation failed.
    #[error("failed to build workbook: {message}")]
    Xlsx { message: String },

    /// Failed to write the workbook to disk.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for OutputError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for OutputError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::Xlsx {
            message: err.to_string(),
        }
    }
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, OutputError>;
