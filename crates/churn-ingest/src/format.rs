//! Upload format detection by file extension.

use std::fmt;
use std::path::Path;

use crate::error::{IngestError, Result};

/// Tabular formats accepted for bulk prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFormat {
    Csv,
    Xlsx,
}

impl UploadFormat {
    /// Sniff the format from a file name (case-insensitive extension).
    pub fn from_file_name(file_name: &str) -> Result<Self> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("xlsx") => Ok(Self::Xlsx),
            _ => Err(IngestError::UnsupportedFormat {
                file_name: file_name.to_string(),
            }),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_file_name(&path.to_string_lossy())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }
}

impl fmt::Display for UploadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_known_extensions() {
        assert_eq!(UploadFormat::from_file_name("data.csv").unwrap(), UploadFormat::Csv);
        assert_eq!(
            UploadFormat::from_file_name("Pelanggan.XLSX").unwrap(),
            UploadFormat::Xlsx
        );
        assert_eq!(
            UploadFormat::from_path(Path::new("/tmp/batch.2024.csv")).unwrap(),
            UploadFormat::Csv
        );
    }

    #[test]
    fn rejects_other_extensions() {
        for name in ["data.xls", "data.json", "data", "csv"] {
            assert!(matches!(
                UploadFormat::from_file_name(name),
                Err(IngestError::UnsupportedFormat { .. })
            ));
        }
    }
}
