//! Churn prediction CLI.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use churn_cli::commands::{
    FileOptions, format_error, load_model, run_file, run_manual, run_model, run_schema,
};
use churn_cli::config::Settings;
use churn_cli::logging::{LogConfig, LogFormat, init_logging};

mod cli;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(error) => {
            tracing::error!(error = %error, "command failed");
            eprintln!("{}", format_error(&error));
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    let load = || {
        load_model(
            &settings.model_path(cli.model.as_deref()),
            settings.model_sha256(cli.model_sha256.as_deref()),
        )
    };
    match &cli.command {
        Command::Manual(args) => {
            let model = load()?;
            run_manual(&model, args.to_record()?)?;
        }
        Command::File(args) => {
            let model = load()?;
            let options = FileOptions {
                path: args.path.clone(),
                output: settings.output_path(args.output.as_deref()),
                preview_only: args.preview_only,
                preview_rows: settings.preview_rows(args.preview_rows),
            };
            run_file(&model, &options)?;
        }
        Command::Schema => run_schema(),
        Command::Model => {
            let model = load()?;
            run_model(&model);
        }
    }
    Ok(())
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
