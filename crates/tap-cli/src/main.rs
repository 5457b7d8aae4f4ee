//! whatstap CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tap_cli::logging::{LogConfig, LogFormat, init_logging};
use tap_cli::summary::{failure_table, sync_table};
use tap_persistence::PersistenceError;
use tap_sync::SyncError;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_classify, run_dial, run_list, run_normalize, run_sync};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Normalize(args) => {
            run_normalize(&args);
            0
        }
        Command::Dial(args) => {
            run_dial(&args);
            0
        }
        Command::Classify(args) => report_result(run_classify(&args)),
        Command::Sync(args) => match run_sync(&args) {
            Ok(report) => {
                if report.dry_run {
                    println!("Dry run: the store was not changed.");
                }
                println!("{}", sync_table(&report));
                if let Some(table) = failure_table(&report) {
                    eprintln!("Failed writes:");
                    eprintln!("{table}");
                }
                println!("{}", report.outcome);
                i32::from(report.has_failures())
            }
            Err(error) => report_error(&error),
        },
        Command::List(args) => report_result(run_list(&args)),
    };
    std::process::exit(exit_code);
}

fn report_result(result: anyhow::Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(error) => report_error(&error),
    }
}

/// Print an error with the user-facing hint of the underlying failure, if any.
fn report_error(error: &anyhow::Error) -> i32 {
    eprintln!("error: {error:#}");
    let (message, suggestion) = if let Some(err) = error.downcast_ref::<SyncError>() {
        (Some(err.user_message()), err.suggestion())
    } else if let Some(err) = error.downcast_ref::<PersistenceError>() {
        (Some(err.user_message()), err.suggestion())
    } else {
        (None, None)
    };
    if let Some(message) = message {
        eprintln!("{message}");
    }
    if let Some(suggestion) = suggestion {
        eprintln!("hint: {suggestion}");
    }
    1
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
