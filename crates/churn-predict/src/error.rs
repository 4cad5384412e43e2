#![deny(unsafe_code)]

use std::path::PathBuf;

/// Errors raised while loading or invoking the churn predictor.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model artifact {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported model artifact format version {found} (supported: {supported})")]
    UnsupportedFormat { found: u32, supported: u32 },

    #[error(
        "model columns do not match the customer schema (expected [{}], found [{}])",
        .expected.join(", "),
        .found.join(", ")
    )]
    IncompatibleSchema {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("invalid model artifact: {message}")]
    InvalidArtifact { message: String },

    #[error("invalid sha256 for {path}: {message}")]
    InvalidSha256 { path: PathBuf, message: String },

    #[error("sha256 mismatch for {path} (expected {expected}, got {actual})")]
    Sha256Mismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("model produced a non-finite score for row {row}")]
    NonFiniteScore { row: usize },
}

impl PredictError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArtifact {
            message: message.into(),
        }
    }

    /// True for failures that happen while loading the artifact.
    pub fn is_load_failure(&self) -> bool {
        !matches!(self, Self::NonFiniteScore { .. })
    }
}

pub type Result<T> = std::result::Result<T, PredictError>;
