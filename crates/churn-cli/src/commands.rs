use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span, trace};

use churn_core::{
    BulkOutcome, CoreError, ErrorCategory, InputMode, ManualOutcome, PREVIEW_HEADING, Session,
};
use churn_ingest::read_upload;
use churn_model::CustomerRecord;
use churn_output::{SHEET_NAME, write_xlsx};
use churn_predict::{ChurnModel, LoadOptions};

use crate::logging::redact_value;
use crate::summary::{
    print_bulk_summary, print_dataframe, print_download, print_message, print_model_info,
    print_schema, print_title,
};

/// Options for a bulk prediction run.
#[derive(Debug, Clone)]
pub struct FileOptions {
    pub path: PathBuf,
    pub output: PathBuf,
    pub preview_only: bool,
    pub preview_rows: usize,
}

/// What a bulk run produced.
#[derive(Debug)]
pub enum FileReport {
    /// The upload was shown but not scored.
    Previewed { rows: usize },
    Predicted {
        outcome: Box<BulkOutcome>,
        output: PathBuf,
    },
}

/// Load and verify the model artifact.
pub fn load_model(path: &Path, sha256: Option<String>) -> Result<ChurnModel> {
    let _span = info_span!("load_model", path = %path.display()).entered();
    let options = LoadOptions::default().with_expected_sha256(sha256);
    let model = ChurnModel::load_with_options(path, &options)
        .map_err(CoreError::from)
        .with_context(|| format!("load model {}", path.display()))?;
    let info = model.info();
    info!(
        name = %info.name,
        version = %info.version,
        features = info.feature_count,
        "model loaded"
    );
    Ok(model)
}

pub fn run_manual(model: &ChurnModel, record: CustomerRecord) -> Result<ManualOutcome> {
    let _span = info_span!("manual").entered();
    print_title();
    trace!(record = redact_value(&format!("{record:?}")), "manual input");

    let mut session = Session::new(model, InputMode::Manual);
    session.stage_manual(record)?;
    let outcome = session
        .submit()
        .context("predict customer")?
        .as_manual()
        .cloned()
        .ok_or_else(|| anyhow!("manual submission produced no manual result"))?;
    print_message(&outcome.message);
    Ok(outcome)
}

pub fn run_file(model: &ChurnModel, options: &FileOptions) -> Result<FileReport> {
    let span = info_span!("file", path = %options.path.display());
    let _guard = span.enter();
    let start = Instant::now();
    print_title();

    let upload = read_upload(&options.path)
        .map_err(CoreError::from)
        .with_context(|| format!("read upload {}", options.path.display()))?;
    if let Some(first) = upload.data.head(Some(1)).get(0) {
        let row: Vec<String> = first.iter().map(ToString::to_string).collect();
        trace!(row = redact_value(&row.join(", ")), "first upload row");
    }
    print_dataframe(PREVIEW_HEADING, &upload.data, options.preview_rows);

    if options.preview_only {
        return Ok(FileReport::Previewed {
            rows: upload.row_count(),
        });
    }

    let mut session = Session::new(model, InputMode::Upload);
    session.stage_upload(upload)?;
    let outcome = session
        .submit()
        .context("predict upload")?
        .as_bulk()
        .cloned()
        .ok_or_else(|| anyhow!("upload submission produced no bulk result"))?;

    print_message(&outcome.message);
    print_dataframe(SHEET_NAME, &outcome.table, options.preview_rows);
    write_xlsx(&outcome.table, &options.output)
        .map_err(CoreError::from)
        .with_context(|| format!("write {}", options.output.display()))?;
    print_bulk_summary(&outcome, Some(&options.output));
    print_download(&options.output);

    info!(
        rows = outcome.row_count(),
        churned = outcome.churn_count(),
        output = %options.output.display(),
        duration_ms = start.elapsed().as_millis() as u64,
        "bulk prediction complete"
    );
    Ok(FileReport::Predicted {
        outcome: Box::new(outcome),
        output: options.output.clone(),
    })
}

pub fn run_schema() {
    print_schema();
}

pub fn run_model(model: &ChurnModel) {
    print_model_info(model.info());
}

/// Taxonomy category of a command failure, if it came from the workflow.
pub fn error_category(error: &anyhow::Error) -> Option<ErrorCategory> {
    error.downcast_ref::<CoreError>().map(CoreError::category)
}

/// One-line rendering of a command failure.
///
/// Causes whose text is already part of the previous message are skipped.
pub fn format_error(error: &anyhow::Error) -> String {
    let mut parts: Vec<String> = Vec::new();
    for cause in error.chain() {
        let text = cause.to_string();
        if parts.last().is_some_and(|previous| previous.contains(&text)) {
            continue;
        }
        parts.push(text);
    }
    let message = parts.join(": ");
    match error_category(error) {
        Some(category) => format!("error: {message} [{category}]"),
        None => format!("error: {message}"),
    }
}
