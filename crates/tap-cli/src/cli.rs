//! CLI argument definitions for whatstap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "whatstap",
    version,
    about = "Favorites launcher tools - sync starred contacts and format numbers",
    long_about = "Keep a launcher's favorites list in step with starred contacts.\n\n\
                  Normalizes phone numbers for matching, formats them for \
                  messaging deep links and classifies phone labels."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

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

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow names and phone numbers in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the match key of each number.
    Normalize(NumbersArgs),

    /// Format numbers for messaging deep links.
    Dial(NumbersArgs),

    /// Resolve a phone type code and custom label.
    Classify(ClassifyArgs),

    /// Sync starred contacts from a CSV export into the store.
    Sync(SyncArgs),

    /// Show the stored favorites.
    List(ListArgs),
}

#[derive(Parser)]
pub struct NumbersArgs {
    /// Phone numbers in any format.
    #[arg(value_name = "NUMBER", required = true)]
    pub numbers: Vec<String>,
}

#[derive(Parser)]
pub struct ClassifyArgs {
    /// Provider type code or name (e.g. 2, mobile, custom).
    #[arg(value_name = "TYPE")]
    pub phone_type: String,

    /// Custom label text for custom-typed entries.
    #[arg(long = "label")]
    pub label: Option<String>,
}

#[derive(Parser)]
pub struct SyncArgs {
    /// CSV export with name,number,photo_uri,type,label,starred columns.
    #[arg(long = "contacts", value_name = "CSV")]
    pub contacts: PathBuf,

    /// Contact store file (default: $WHATSTAP_STORE or contacts.json).
    #[arg(long = "store", value_name = "JSON")]
    pub store: Option<PathBuf>,

    /// Report what would change without writing the store.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Keep applying changes after a failed store write.
    #[arg(long = "continue-on-error")]
    pub continue_on_error: bool,

    /// Sync contacts whose number has no digits instead of skipping them.
    #[arg(long = "keep-unmatchable")]
    pub keep_unmatchable: bool,
}

#[derive(Parser)]
pub struct ListArgs {
    /// Contact store file (default: $WHATSTAP_STORE or contacts.json).
    #[arg(long = "store", value_name = "JSON")]
    pub store: Option<PathBuf>,

    /// Plan taps as if no messaging app were installed.
    #[arg(long = "no-messaging-app")]
    pub no_messaging_app: bool,
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
