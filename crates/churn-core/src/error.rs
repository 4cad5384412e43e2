//! Workflow errors and their user-facing taxonomy.

use std::fmt;

use churn_ingest::IngestError;
use churn_model::ModelError;
use churn_output::OutputError;
use churn_predict::PredictError;
use thiserror::Error;

use crate::session::SessionState;

/// Failure class shown next to an error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The predictor artifact could not be loaded or verified.
    ArtifactLoad,
    /// The uploaded file could not be read or parsed.
    UploadRead,
    /// The input does not carry the trained columns.
    SchemaMismatch,
    /// A value is out of range, of the wrong type, or submitted at the wrong time.
    InvalidInput,
    /// Inference failed.
    Prediction,
    /// The result workbook could not be generated.
    Export,
}

impl ErrorCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ArtifactLoad => "artifact load",
            Self::UploadRead => "upload read",
            Self::SchemaMismatch => "schema mismatch",
            Self::InvalidInput => "invalid input",
            Self::Prediction => "prediction",
            Self::Export => "export",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by the prediction workflow.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Predict(#[from] PredictError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Input(#[from] ModelError),

    #[error(transparent)]
    Output(#[from] OutputError),

    /// Predictor was trained on a different column layout than the records.
    #[error("predictor columns do not match the customer schema: expected {}, found {}", .expected.join(", "), .found.join(", "))]
    ColumnMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// Predictor returned a different number of outputs than records given.
    #[error("predictor returned {found} {output}(s) for {expected} record(s)")]
    OutputCount {
        output: &'static str,
        expected: usize,
        found: usize,
    },

    /// Action not allowed in the current session state or mode.
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        state: SessionState,
        action: &'static str,
    },
}

impl CoreError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Predict(err) if err.is_load_failure() => ErrorCategory::ArtifactLoad,
            Self::Predict(_) | Self::OutputCount { .. } => ErrorCategory::Prediction,
            Self::Ingest(IngestError::SchemaMismatch { .. }) | Self::ColumnMismatch { .. } => {
                ErrorCategory::SchemaMismatch
            }
            Self::Ingest(IngestError::InvalidRow { .. })
            | Self::Input(_)
            | Self::InvalidTransition { .. } => ErrorCategory::InvalidInput,
            Self::Ingest(_) => ErrorCategory::UploadRead,
            Self::Output(_) => ErrorCategory::Export,
        }
    }
}

/// Result type for workflow operations.
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn categorizes_upstream_errors() {
        let missing = CoreError::from(IngestError::SchemaMismatch {
            missing: vec!["Complain".to_string()],
        });
        assert_eq!(missing.category(), ErrorCategory::SchemaMismatch);

        let unreadable = CoreError::from(IngestError::UnsupportedFormat {
            file_name: "data.json".to_string(),
        });
        assert_eq!(unreadable.category(), ErrorCategory::UploadRead);

        let range = CoreError::from(ModelError::OutOfRange {
            field: "Tenure",
            value: 101,
            min: 0,
            max: 100,
        });
        assert_eq!(range.category(), ErrorCategory::InvalidInput);

        let load = CoreError::from(PredictError::InvalidArtifact {
            message: "bad".to_string(),
        });
        assert_eq!(load.category(), ErrorCategory::ArtifactLoad);

        let scoring = CoreError::from(PredictError::NonFiniteScore { row: 0 });
        assert_eq!(scoring.category(), ErrorCategory::Prediction);

        let export = CoreError::from(OutputError::Write {
            path: PathBuf::from("out.xlsx"),
            source: std::io::Error::other("disk full"),
        });
        assert_eq!(export.category(), ErrorCategory::Export);
    }

    #[test]
    fn transition_message_names_state() {
        let err = CoreError::InvalidTransition {
            state: SessionState::Idle,
            action: "submit",
        };
        assert_eq!(err.to_string(), "cannot submit while idle");
        assert_eq!(err.category(), ErrorCategory::InvalidInput);
    }
}
