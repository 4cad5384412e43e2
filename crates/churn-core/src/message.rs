//! User-facing result messages.

use std::fmt;

use churn_model::{ChurnLabel, ResultRecord};

use crate::error::CoreError;

/// Application title.
pub const APP_TITLE: &str = "📊 Prediksi Churn Pelanggan E-Commerce";

/// Heading shown above an uploaded table before prediction.
pub const PREVIEW_HEADING: &str = "📄 Data yang diupload:";

/// Shown after a bulk prediction completes.
pub const BULK_SUCCESS_TEXT: &str = "✅ Prediksi berhasil dilakukan!";

/// Label of the result download action.
pub const DOWNLOAD_LABEL: &str = "⬇️ Unduh Hasil Prediksi (.xlsx)";

/// How a message should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A rendered outcome message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultMessage {
    pub severity: Severity,
    pub text: String,
}

impl ResultMessage {
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
        }
    }

    /// Message for a single manual prediction.
    pub fn for_result(result: &ResultRecord) -> Self {
        let probability = result.probability;
        match result.label {
            ChurnLabel::Churn => Self::new(
                Severity::Warning,
                format!("⚠️ Pelanggan diprediksi akan CHURN (Probabilitas: {probability:.2})"),
            ),
            ChurnLabel::Retained => Self::new(
                Severity::Success,
                format!(
                    "✅ Pelanggan diprediksi TIDAK churn (Probabilitas churn: {probability:.2})"
                ),
            ),
        }
    }

    pub fn bulk_success() -> Self {
        Self::new(Severity::Success, BULK_SUCCESS_TEXT)
    }

    pub fn for_error(error: &CoreError) -> Self {
        Self::new(Severity::Error, format!("{}: {error}", error.category()))
    }
}

impl fmt::Display for ResultMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
