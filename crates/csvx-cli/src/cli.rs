//! CLI argument definitions for the CSV explorer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use csvx_report::{DEFAULT_EXPLORER_CONFIG, PREVIEW_DEFAULT_ROWS};

#[derive(Parser)]
#[command(
    name = "csv-explorer",
    version,
    about = "CSV Explorer - inspect a CSV file and explore it interactively",
    long_about = "Load a CSV file, report summary statistics and column information,\n\
                  preview its rows, and render it for the interactive data explorer."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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

    /// Prefix log lines with timestamps.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Allow cell values to appear in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load a CSV file and report on it.
    Inspect(InspectArgs),

    /// Explore the built-in sample dataset stored in a session.
    Sample(SampleArgs),

    /// Manage stored session state.
    Session {
        #[command(subcommand)]
        command: SessionCommand,
    },
}

/// Output options shared by `inspect` and `sample`.
#[derive(Args)]
pub struct ViewArgs {
    /// Number of rows to preview (clamped to 5..=100).
    #[arg(long = "preview", value_name = "N", default_value_t = PREVIEW_DEFAULT_ROWS)]
    pub preview: usize,

    /// Write the explorer page to this HTML file.
    #[arg(long = "html", value_name = "OUT")]
    pub html: Option<PathBuf>,

    /// Widget configuration for the interactive explorer.
    #[arg(
        long = "explorer-config",
        value_name = "PATH",
        default_value = DEFAULT_EXPLORER_CONFIG
    )]
    pub explorer_config: PathBuf,
}

#[derive(Args)]
pub struct InspectArgs {
    /// CSV file to load.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Require at least this many data rows.
    #[arg(long = "min-rows", value_name = "N")]
    pub min_rows: Option<usize>,

    /// Require a column (repeatable).
    #[arg(long = "require", value_name = "COLUMN")]
    pub require: Vec<String>,

    /// JSON file with validation rules (`min_rows`, `required_columns`).
    #[arg(long = "rules", value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// How to handle rows whose field count differs from the header.
    #[arg(long = "ragged", value_enum, default_value = "reject")]
    pub ragged: RaggedArg,

    /// Extra cell value to treat as missing (repeatable).
    #[arg(long = "na-value", value_name = "TOKEN")]
    pub na_values: Vec<String>,

    /// Report format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,

    #[command(flatten)]
    pub view: ViewArgs,
}

#[derive(Args)]
pub struct SampleArgs {
    /// Session identifier the sample is stored under.
    #[arg(long = "session", value_name = "ID")]
    pub session: String,

    /// Seed for generating a new sample.
    #[arg(long = "seed", value_name = "N")]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub view: ViewArgs,
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Remove a session's stored data.
    Clear {
        /// Session identifier.
        #[arg(long = "session", value_name = "ID")]
        session: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RaggedArg {
    Reject,
    Pad,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormatArg {
    Table,
    Json,
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
