//! Model artifact path resolution.

use std::path::PathBuf;

/// Environment variable for overriding the model artifact path.
pub const MODEL_PATH_ENV_VAR: &str = "CHURN_MODEL_PATH";

/// File name of the bundled churn model artifact.
pub const DEFAULT_MODEL_FILE: &str = "best_model_ecomerce_churn.json";

/// Get the model artifact path.
///
/// Resolution order:
/// 1. `CHURN_MODEL_PATH` environment variable
/// 2. `models/best_model_ecomerce_churn.json` relative to workspace root
pub fn default_model_path() -> PathBuf {
    if let Ok(path) = std::env::var(MODEL_PATH_ENV_VAR) {
        return PathBuf::from(path);
    }
    bundled_model_path()
}

/// Path of the artifact shipped with the workspace, ignoring the environment.
pub fn bundled_model_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../models")
        .join(DEFAULT_MODEL_FILE)
}
