#![deny(unsafe_code)]

//! Serialized form of the fitted churn pipeline.
//!
//! The artifact describes a standardize-then-one-hot logistic model. Features
//! are listed in trained column order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Artifact format version understood by this crate.
pub const SUPPORTED_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub artifact: ArtifactHeader,
    pub features: Vec<FeatureSpec>,
    pub intercept: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactHeader {
    pub name: String,
    pub version: String,
    pub format_version: u32,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureSpec {
    /// Standardized numeric input: `weight * (x - mean) / scale`.
    Numeric {
        column: String,
        #[serde(default)]
        mean: f64,
        #[serde(default = "default_scale")]
        scale: f64,
        weight: f64,
    },
    /// One-hot encoded category with one weight per known value.
    Categorical {
        column: String,
        weights: BTreeMap<String, f64>,
        #[serde(default)]
        unknown_weight: f64,
    },
}

impl FeatureSpec {
    pub fn column(&self) -> &str {
        match self {
            FeatureSpec::Numeric { column, .. } | FeatureSpec::Categorical { column, .. } => column,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, FeatureSpec::Numeric { .. })
    }
}

fn default_threshold() -> f64 {
    0.5
}

fn default_scale() -> f64 {
    1.0
}
