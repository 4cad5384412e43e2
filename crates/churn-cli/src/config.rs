//! Workspace settings loaded from `churn.toml`.
//!
//! Precedence for every option: command-line flag, then the config file,
//! then (for the model path) `CHURN_MODEL_PATH`, then the built-in default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use churn_output::DOWNLOAD_FILE_NAME;
use churn_predict::default_model_path;
use serde::{Deserialize, Serialize};

/// Config file looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "churn.toml";

/// Rows of an uploaded table shown before prediction.
pub const DEFAULT_PREVIEW_ROWS: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub model: ModelSettings,
    pub export: ExportSettings,

    /// Directory of the file the settings came from. Relative paths in the
    /// file are resolved against it.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelSettings {
    /// Path to the model artifact.
    pub path: Option<PathBuf>,
    /// Expected sha256 of the artifact bytes.
    pub sha256: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportSettings {
    /// Where the result workbook is written.
    pub output: Option<PathBuf>,
    pub preview_rows: Option<usize>,
}

impl Settings {
    /// Load settings.
    ///
    /// An explicit path must exist. Without one, `churn.toml` in the working
    /// directory is used when present, otherwise defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => {
                let candidate = Path::new(CONFIG_FILE_NAME);
                if candidate.is_file() {
                    Self::load_from(candidate)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load settings from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let mut settings: Self =
            toml::from_str(&content).with_context(|| format!("parse config {}", path.display()))?;
        settings.base_dir = path.parent().map(Path::to_path_buf);
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(settings)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    pub fn model_path(&self, cli: Option<&Path>) -> PathBuf {
        if let Some(path) = cli {
            return path.to_path_buf();
        }
        match &self.model.path {
            Some(path) => self.resolve(path),
            None => default_model_path(),
        }
    }

    pub fn model_sha256(&self, cli: Option<&str>) -> Option<String> {
        cli.map(str::to_string).or_else(|| self.model.sha256.clone())
    }

    pub fn output_path(&self, cli: Option<&Path>) -> PathBuf {
        if let Some(path) = cli {
            return path.to_path_buf();
        }
        match &self.export.output {
            Some(path) => self.resolve(path),
            None => PathBuf::from(DOWNLOAD_FILE_NAME),
        }
    }

    pub fn preview_rows(&self, cli: Option<usize>) -> usize {
        cli.or(self.export.preview_rows)
            .unwrap_or(DEFAULT_PREVIEW_ROWS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_without_file() {
        let settings = Settings::default();
        assert_eq!(settings.output_path(None), PathBuf::from(DOWNLOAD_FILE_NAME));
        assert_eq!(settings.preview_rows(None), DEFAULT_PREVIEW_ROWS);
        assert_eq!(settings.model_sha256(None), None);
    }

    #[test]
    fn file_values_resolve_against_config_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("churn.toml");
        std::fs::write(
            &path,
            "[model]\npath = \"models/custom.json\"\nsha256 = \"abc\"\n\n[export]\noutput = \"out/result.xlsx\"\npreview_rows = 3\n",
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(
            settings.model_path(None),
            dir.path().join("models/custom.json")
        );
        assert_eq!(settings.model_sha256(None).as_deref(), Some("abc"));
        assert_eq!(settings.output_path(None), dir.path().join("out/result.xlsx"));
        assert_eq!(settings.preview_rows(None), 3);
    }

    #[test]
    fn flags_override_file() {
        let settings = Settings {
            model: ModelSettings {
                path: Some(PathBuf::from("/srv/model.json")),
                sha256: Some("abc".to_string()),
            },
            export: ExportSettings {
                output: Some(PathBuf::from("/srv/out.xlsx")),
                preview_rows: Some(3),
            },
            base_dir: None,
        };
        assert_eq!(
            settings.model_path(Some(Path::new("flag.json"))),
            PathBuf::from("flag.json")
        );
        assert_eq!(settings.model_sha256(Some("def")).as_deref(), Some("def"));
        assert_eq!(
            settings.output_path(Some(Path::new("flag.xlsx"))),
            PathBuf::from("flag.xlsx")
        );
        assert_eq!(settings.preview_rows(Some(20)), 20);
        assert_eq!(settings.model_path(None), PathBuf::from("/srv/model.json"));
    }

    #[test]
    fn rejects_unknown_keys_and_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("churn.toml");
        std::fs::write(&path, "[model]\nfile = \"x.json\"\n").unwrap();
        assert!(Settings::load(Some(&path)).is_err());
        assert!(Settings::load(Some(&dir.path().join("absent.toml"))).is_err());
    }
}
