//! Customer upload ingestion.
//!
//! This crate turns a bulk upload (CSV or XLSX) into a Polars DataFrame and,
//! from there, into typed [`churn_model::CustomerRecord`]s.
//!
//! # Features
//!
//! - **Format Sniffing**: `.csv` or `.xlsx` by file extension
//! - **CSV Loading**: header checks plus Polars schema inference
//! - **XLSX Loading**: first worksheet, per-column type inference
//! - **Schema Validation**: missing trained columns are rejected up front
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use churn_ingest::{extract_records, read_upload};
//!
//! let upload = read_upload(Path::new("pelanggan.csv"))?;
//! let records = extract_records(&upload.data)?;
//! ```

mod csv_reader;
mod error;
mod format;
mod polars_utils;
mod records;
mod upload;
mod xlsx_reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === Readers ===
pub use csv_reader::{read_csv_bytes, read_csv_headers, validate_encoding};
pub use format::UploadFormat;
pub use upload::{Upload, read_upload, read_upload_bytes};
pub use xlsx_reader::read_xlsx_bytes;

// === Records ===
pub use polars_utils::{any_to_string, format_numeric};
pub use records::{check_schema, column_names, extract_records};
