#![deny(unsafe_code)]

use std::path::{Path, PathBuf};

use churn_model::{
    CUSTOMER_COLUMNS, ChurnLabel, ColumnKind, CustomerRecord, FieldValue, column_spec,
};
use tracing::{debug, info, warn};

use crate::artifact::{FeatureSpec, ModelArtifact, SUPPORTED_FORMAT_VERSION};
use crate::error::{PredictError, Result};
use crate::hash::sha256_hex;
use crate::predictor::ChurnPredictor;

/// Options applied while loading an artifact.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Expected hex sha256 of the artifact file. Compared case-insensitively.
    pub expected_sha256: Option<String>,
}

impl LoadOptions {
    #[must_use]
    pub fn with_expected_sha256(mut self, digest: Option<String>) -> Self {
        self.expected_sha256 = digest;
        self
    }
}

/// Summary of a loaded artifact.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ModelInfo {
    pub path: PathBuf,
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    pub sha256: String,
    pub threshold: f64,
    pub feature_count: usize,
}

/// Immutable churn predictor loaded from a JSON artifact.
///
/// Construct once at startup and share by reference; scoring never mutates
/// the handle.
#[derive(Debug, Clone)]
pub struct ChurnModel {
    artifact: ModelArtifact,
    columns: Vec<String>,
    info: ModelInfo,
}

impl ChurnModel {
    /// Load and verify an artifact from disk.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_options(path, &LoadOptions::default())
    }

    pub fn load_with_options(path: &Path, options: &LoadOptions) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| PredictError::io(path, source))?;
        let sha256 = sha256_hex(&bytes);
        if let Some(expected) = &options.expected_sha256 {
            verify_sha256(path, expected, &sha256)?;
        }
        let artifact: ModelArtifact =
            serde_json::from_slice(&bytes).map_err(|source| PredictError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        let model = Self::from_artifact(artifact, path.to_path_buf(), sha256)?;
        info!(
            path = %path.display(),
            name = %model.info.name,
            version = %model.info.version,
            features = model.info.feature_count,
            "model artifact loaded"
        );
        Ok(model)
    }

    /// Build a predictor from an in-memory artifact.
    pub fn from_artifact(artifact: ModelArtifact, path: PathBuf, sha256: String) -> Result<Self> {
        validate_artifact(&artifact)?;
        let columns: Vec<String> = artifact
            .features
            .iter()
            .map(|feature| feature.column().to_string())
            .collect();
        let info = ModelInfo {
            path,
            name: artifact.artifact.name.clone(),
            version: artifact.artifact.version.clone(),
            description: artifact.artifact.description.clone(),
            sha256,
            threshold: artifact.threshold,
            feature_count: artifact.features.len(),
        };
        Ok(Self {
            artifact,
            columns,
            info,
        })
    }

    pub fn info(&self) -> &ModelInfo {
        &self.info
    }

    pub fn threshold(&self) -> f64 {
        self.artifact.threshold
    }

    fn score(&self, row: usize, record: &CustomerRecord) -> Result<f64> {
        let mut logit = self.artifact.intercept;
        for (feature, (_, value)) in self.artifact.features.iter().zip(record.fields()) {
            logit += contribution(feature, value);
        }
        let probability = sigmoid(logit);
        if !probability.is_finite() {
            return Err(PredictError::NonFiniteScore { row });
        }
        Ok(probability)
    }
}

impl ChurnPredictor for ChurnModel {
    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn predict(&self, records: &[CustomerRecord]) -> Result<Vec<ChurnLabel>> {
        let threshold = self.artifact.threshold;
        Ok(self
            .predict_probability(records)?
            .into_iter()
            .map(|probability| ChurnLabel::from_flag(probability >= threshold))
            .collect())
    }

    fn predict_probability(&self, records: &[CustomerRecord]) -> Result<Vec<f64>> {
        debug!(rows = records.len(), "scoring records");
        records
            .iter()
            .enumerate()
            .map(|(row, record)| self.score(row, record))
            .collect()
    }
}

fn contribution(feature: &FeatureSpec, value: FieldValue) -> f64 {
    match feature {
        FeatureSpec::Numeric {
            mean,
            scale,
            weight,
            ..
        } => {
            let x = value.as_f64().unwrap_or(*mean);
            weight * (x - mean) / scale
        }
        FeatureSpec::Categorical {
            weights,
            unknown_weight,
            ..
        } => match value {
            FieldValue::Category(category) => {
                weights.get(category).copied().unwrap_or(*unknown_weight)
            }
            other => weights
                .get(&other.to_string())
                .copied()
                .unwrap_or(*unknown_weight),
        },
    }
}

fn sigmoid(logit: f64) -> f64 {
    1.0 / (1.0 + (-logit).exp())
}

fn verify_sha256(path: &Path, expected: &str, actual: &str) -> Result<()> {
    let expected = expected.trim().to_ascii_lowercase();
    if expected.len() != 64 || !expected.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(PredictError::InvalidSha256 {
            path: path.to_path_buf(),
            message: "expected 64 hex characters".to_string(),
        });
    }
    if expected != actual {
        return Err(PredictError::Sha256Mismatch {
            path: path.to_path_buf(),
            expected,
            actual: actual.to_string(),
        });
    }
    Ok(())
}

fn validate_artifact(artifact: &ModelArtifact) -> Result<()> {
    let format_version = artifact.artifact.format_version;
    if format_version != SUPPORTED_FORMAT_VERSION {
        return Err(PredictError::UnsupportedFormat {
            found: format_version,
            supported: SUPPORTED_FORMAT_VERSION,
        });
    }

    let found: Vec<&str> = artifact
        .features
        .iter()
        .map(FeatureSpec::column)
        .collect();
    if found != CUSTOMER_COLUMNS {
        return Err(PredictError::IncompatibleSchema {
            expected: CUSTOMER_COLUMNS.iter().map(|c| (*c).to_string()).collect(),
            found: found.iter().map(|c| (*c).to_string()).collect(),
        });
    }

    if !(artifact.threshold > 0.0 && artifact.threshold < 1.0) {
        return Err(PredictError::invalid(format!(
            "threshold must lie strictly between 0 and 1 (got {})",
            artifact.threshold
        )));
    }
    if !artifact.intercept.is_finite() {
        return Err(PredictError::invalid("intercept must be finite"));
    }

    for feature in &artifact.features {
        let Some(spec) = column_spec(feature.column()) else {
            continue;
        };
        let numeric_column = spec.kind.is_numeric();
        if feature.is_numeric() != numeric_column {
            return Err(PredictError::invalid(format!(
                "feature {} must be {}",
                spec.name,
                if numeric_column { "numeric" } else { "categorical" }
            )));
        }
        match feature {
            FeatureSpec::Numeric {
                mean,
                scale,
                weight,
                ..
            } => {
                if !(mean.is_finite() && weight.is_finite() && scale.is_finite()) || *scale == 0.0
                {
                    return Err(PredictError::invalid(format!(
                        "feature {} needs finite mean/weight and a non-zero scale",
                        spec.name
                    )));
                }
            }
            FeatureSpec::Categorical { weights, .. } => {
                if let ColumnKind::Category { values } = spec.kind {
                    for category in weights.keys() {
                        if !values.iter().any(|value| *value == category) {
                            warn!(
                                column = spec.name,
                                category = %category,
                                "model weight for a category the schema does not define"
                            );
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_is_centered() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!(sigmoid(50.0) > 0.999);
        assert!(sigmoid(-50.0) < 0.001);
        assert_eq!(sigmoid(-1000.0), 0.0);
    }

    #[test]
    fn sha256_check_is_case_insensitive() {
        let path = Path::new("model.json");
        let digest = sha256_hex(b"abc");
        assert!(verify_sha256(path, &digest.to_uppercase(), &digest).is_ok());
        assert!(matches!(
            verify_sha256(path, "zz", &digest),
            Err(PredictError::InvalidSha256 { .. })
        ));
        assert!(matches!(
            verify_sha256(path, &sha256_hex(b"abd"), &digest),
            Err(PredictError::Sha256Mismatch { .. })
        ));
    }
}
