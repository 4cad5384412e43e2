#![deny(unsafe_code)]

//! Churn predictor handle.
//!
//! Loads the serialized churn pipeline once, verifies it against the customer
//! schema (and optionally a pinned sha256), and exposes it through the
//! [`ChurnPredictor`] trait.

pub mod artifact;
pub mod error;
pub mod hash;
pub mod model;
pub mod paths;
pub mod predictor;

pub use crate::artifact::{ArtifactHeader, FeatureSpec, ModelArtifact, SUPPORTED_FORMAT_VERSION};
pub use crate::error::{PredictError, Result};
pub use crate::model::{ChurnModel, LoadOptions, ModelInfo};
pub use crate::paths::{MODEL_PATH_ENV_VAR, bundled_model_path, default_model_path};
pub use crate::predictor::ChurnPredictor;
