//! CLI argument definitions for the hours cleanser.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use hours_cli::config::ExtractorKind;
use hours_output::TimeFormat;

#[derive(Parser)]
#[command(
    name = "hours-clean",
    version,
    about = "Turn free-text program hours into structured bulk-upload rows",
    long_about = "Turn free-text program hours into structured bulk-upload rows.\n\n\
                  Reads a program table with an uncleaned hours column, extracts\n\
                  weekly, monthly and dated schedules, and writes one row per fact\n\
                  together with an error report and a run manifest."
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

    /// Allow raw hours text in log output (redacted by default).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Cleanse a program table and write rows, error report and manifest.
    Clean(CleanArgs),

    /// Check the input schema (required columns, unique ids) without extracting.
    Check(CheckArgs),

    /// Run one plaintext string through the offline extractor and print its rows.
    Parse(ParseArgs),

    /// Export prompt/completion JSONL for fine-tuning the extractor.
    TrainingData(TrainingDataArgs),
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Program table (CSV).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Cleansed rows (default: <INPUT>.cleaned.csv).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Per-program error report (default: <INPUT>.errors.csv).
    #[arg(long = "errors", value_name = "PATH")]
    pub errors: Option<PathBuf>,

    /// Run manifest (default: <INPUT>.manifest.json).
    #[arg(long = "manifest", value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// TOML configuration file.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Extraction backend.
    #[arg(long = "extractor", value_enum)]
    pub extractor: Option<ExtractorArg>,

    /// Programs processed concurrently.
    #[arg(long = "workers", value_name = "N")]
    pub workers: Option<usize>,

    /// Header of the plaintext hours column.
    #[arg(long = "uncleaned-column", value_name = "NAME")]
    pub uncleaned_column: Option<String>,

    /// Keep the plaintext hours column in the output as provenance.
    #[arg(long = "keep-uncleaned")]
    pub keep_uncleaned: bool,

    /// Time format for open/close columns.
    #[arg(long = "time-format", value_enum)]
    pub time_format: Option<TimeFormatArg>,

    /// Run everything and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Program table (CSV).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Header of the plaintext hours column.
    #[arg(long = "uncleaned-column", value_name = "NAME")]
    pub uncleaned_column: Option<String>,
}

#[derive(Parser)]
pub struct ParseArgs {
    /// Plaintext hours, e.g. "Mon-Fri 9-5, closed 12/25".
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Time format for open/close columns.
    #[arg(long = "time-format", value_enum, default_value = "12h")]
    pub time_format: TimeFormatArg,
}

#[derive(Parser)]
pub struct TrainingDataArgs {
    /// Source table (CSV).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Destination JSONL file.
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Column holding the prompt text.
    #[arg(value_name = "INPUT_COLUMN")]
    pub input_column: String,

    /// Column holding the expected completion.
    #[arg(value_name = "OUTPUT_COLUMN")]
    pub output_column: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExtractorArg {
    /// Fine-tuned completions deployment.
    Completions,
    /// Offline rule-based segmentation.
    Plaintext,
}

impl From<ExtractorArg> for ExtractorKind {
    fn from(value: ExtractorArg) -> Self {
        match value {
            ExtractorArg::Completions => ExtractorKind::Completions,
            ExtractorArg::Plaintext => ExtractorKind::Plaintext,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TimeFormatArg {
    #[value(name = "12h")]
    TwelveHour,
    #[value(name = "24h")]
    TwentyFourHour,
}

impl From<TimeFormatArg> for TimeFormat {
    fn from(value: TimeFormatArg) -> Self {
        match value {
            TimeFormatArg::TwelveHour => TimeFormat::TwelveHour,
            TimeFormatArg::TwentyFourHour => TimeFormat::TwentyFourHour,
        }
    }
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
