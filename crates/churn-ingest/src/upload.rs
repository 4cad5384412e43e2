//! Upload entry points.

use std::path::Path;

use polars::prelude::DataFrame;
use tracing::info;

use crate::csv_reader::read_csv_bytes;
use crate::error::{IngestError, Result};
use crate::format::UploadFormat;
use crate::xlsx_reader::read_xlsx_bytes;

/// A parsed upload: the uploaded table with every column it contained.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub format: UploadFormat,
    pub data: DataFrame,
}

impl Upload {
    pub fn row_count(&self) -> usize {
        self.data.height()
    }
}

/// Parse an in-memory upload, choosing the reader from the file name.
pub fn read_upload_bytes(file_name: &str, bytes: &[u8]) -> Result<Upload> {
    let format = UploadFormat::from_file_name(file_name)?;
    let data = match format {
        UploadFormat::Csv => read_csv_bytes(file_name, bytes)?,
        UploadFormat::Xlsx => read_xlsx_bytes(file_name, bytes)?,
    };
    info!(
        file_name,
        format = %format,
        rows = data.height(),
        columns = data.width(),
        "upload parsed"
    );
    Ok(Upload {
        file_name: file_name.to_string(),
        format,
        data,
    })
}

/// Read and parse an upload from disk.
pub fn read_upload(path: &Path) -> Result<Upload> {
    // Sniff before reading so unsupported files are rejected without I/O.
    UploadFormat::from_path(path)?;
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    read_upload_bytes(&file_name, &bytes)
}
