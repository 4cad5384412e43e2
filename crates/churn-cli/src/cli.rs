//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use churn_core::APP_TITLE;
use churn_model::{CustomerRecord, MaritalStatus, PreferedOrderCat, SatisfactionScore};

#[derive(Parser)]
#[command(
    name = "churn",
    version,
    about = APP_TITLE,
    long_about = "Predict whether e-commerce customers will churn.\n\n\
                  Score a single customer from flags, or every row of a CSV/XLSX\n\
                  upload, and export the results as an XLSX workbook."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Model artifact to load (overrides config and CHURN_MODEL_PATH).
    #[arg(long = "model", value_name = "PATH", global = true)]
    pub model: Option<PathBuf>,

    /// Expected sha256 of the model artifact.
    #[arg(long = "model-sha256", value_name = "HEX", global = true)]
    pub model_sha256: Option<String>,

    /// Config file (default: ./churn.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Append logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow customer values in trace logs (redacted otherwise).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Predict churn for one customer entered as flags.
    Manual(ManualArgs),

    /// Predict churn for every row of a CSV or XLSX file.
    File(FileArgs),

    /// Show the customer columns the model expects.
    Schema,

    /// Show metadata of the loaded model artifact.
    Model,
}

#[derive(Args)]
pub struct ManualArgs {
    /// Tenure (bulan).
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(i64).range(0..=100))]
    pub tenure: i64,

    /// Warehouse to Home (km).
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(i64).range(0..=100))]
    pub warehouse_to_home: i64,

    /// Jumlah Perangkat Terdaftar.
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(i64).range(1..=10))]
    pub devices: i64,

    /// Kategori Pesanan Favorit (Mobile Phone, Laptop & Accessory, Grocery, Mobile, Others, Fashion).
    #[arg(long, default_value = "Mobile Phone", value_parser = parse_order_category)]
    pub order_category: PreferedOrderCat,

    /// Skor Kepuasan (1-5).
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub satisfaction: u8,

    /// Status Pernikahan (Single, Married, Divorced).
    #[arg(long, default_value = "Single", value_parser = parse_marital_status)]
    pub marital_status: MaritalStatus,

    /// Jumlah Alamat.
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(i64).range(1..=10))]
    pub addresses: i64,

    /// Pernah Komplain? (0 or 1).
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub complain: u8,

    /// Hari Sejak Transaksi Terakhir.
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(i64).range(0..=365))]
    pub days_since_last_order: i64,

    /// Jumlah Cashback.
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(i64).range(0..=1000))]
    pub cashback: i64,
}

impl ManualArgs {
    pub fn to_record(&self) -> churn_model::Result<CustomerRecord> {
        Ok(CustomerRecord {
            tenure: self.tenure,
            warehouse_to_home: self.warehouse_to_home,
            number_of_device_registered: self.devices,
            prefered_order_cat: self.order_category,
            satisfaction_score: SatisfactionScore::new(self.satisfaction)?,
            marital_status: self.marital_status,
            number_of_address: self.addresses,
            complain: self.complain == 1,
            day_since_last_order: self.days_since_last_order,
            cashback_amount: self.cashback,
        })
    }
}

fn parse_order_category(raw: &str) -> Result<PreferedOrderCat, String> {
    raw.parse().map_err(|e: churn_model::ModelError| e.to_string())
}

fn parse_marital_status(raw: &str) -> Result<MaritalStatus, String> {
    raw.parse().map_err(|e: churn_model::ModelError| e.to_string())
}

#[derive(Args)]
pub struct FileArgs {
    /// CSV or XLSX file with one customer per row.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Where to write the result workbook (default: hasil_prediksi_churn.xlsx).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Show the uploaded table without predicting.
    #[arg(long = "preview-only")]
    pub preview_only: bool,

    /// Number of rows shown in table previews.
    #[arg(long = "preview-rows", value_name = "N")]
    pub preview_rows: Option<usize>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn about_is_the_application_title() {
        let command = Cli::command();
        let about = command.get_about().map(ToString::to_string);
        assert_eq!(about.as_deref(), Some(APP_TITLE));
    }

    #[test]
    fn manual_defaults_match_form_defaults() {
        let cli = Cli::try_parse_from(["churn", "manual"]).unwrap();
        let Command::Manual(args) = cli.command else {
            panic!("expected manual command");
        };
        let record = args.to_record().unwrap();
        assert_eq!(record, CustomerRecord::default());
    }

    #[test]
    fn manual_flags_are_range_checked() {
        assert!(Cli::try_parse_from(["churn", "manual", "--tenure", "101"]).is_err());
        assert!(Cli::try_parse_from(["churn", "manual", "--satisfaction", "0"]).is_err());
        assert!(Cli::try_parse_from(["churn", "manual", "--marital-status", "Widowed"]).is_err());

        let cli = Cli::try_parse_from([
            "churn",
            "manual",
            "--order-category",
            "Laptop & Accessory",
            "--complain",
            "1",
        ])
        .unwrap();
        let Command::Manual(args) = cli.command else {
            panic!("expected manual command");
        };
        let record = args.to_record().unwrap();
        assert_eq!(record.prefered_order_cat, PreferedOrderCat::LaptopAccessory);
        assert!(record.complain);
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "churn",
            "file",
            "pelanggan.csv",
            "--preview-only",
            "--model",
            "model.json",
            "--log-data",
        ])
        .unwrap();
        assert_eq!(cli.model, Some(PathBuf::from("model.json")));
        assert!(cli.log_data);
        let Command::File(args) = cli.command else {
            panic!("expected file command");
        };
        assert!(args.preview_only);
        assert_eq!(args.preview_rows, None);
    }
}
