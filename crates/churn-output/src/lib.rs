//! Prediction result export.
//!
//! Appends the derived `Prediksi Churn` / `Probabilitas Churn` columns to an
//! uploaded table and renders the result as an XLSX workbook in memory.

pub mod augment;
pub mod error;
pub mod xlsx;

pub use augment::augment;
pub use error::{OutputError, Result};
pub use xlsx::{DOWNLOAD_FILE_NAME, SHEET_NAME, XLSX_MIME_TYPE, export_xlsx, write_xlsx};
