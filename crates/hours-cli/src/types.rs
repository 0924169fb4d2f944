use std::path::PathBuf;

use hours_core::{CleansingReport, ProgramOutcome};
use hours_output::{OutputLayout, TimeFormat};

/// Result of a `clean` run.
#[derive(Debug)]
pub struct CleanResult {
    pub input: PathBuf,
    /// `None` on a dry run.
    pub output_path: Option<PathBuf>,
    pub error_report_path: Option<PathBuf>,
    pub manifest_path: Option<PathBuf>,
    pub extractor: String,
    pub time_format: TimeFormat,
    pub report: CleansingReport,
}

impl CleanResult {
    pub fn has_errors(&self) -> bool {
        self.report.has_errors()
    }
}

/// Result of a schema `check`.
#[derive(Debug)]
pub struct CheckResult {
    pub input: PathBuf,
    pub programs: usize,
    /// Programs whose uncleaned hours cell is blank.
    pub blank_hours: usize,
    pub uncleaned_column: String,
    /// Input columns copied to the output unchanged.
    pub pass_through: Vec<String>,
}

/// Result of parsing one string offline.
#[derive(Debug)]
pub struct ParseResult {
    pub layout: OutputLayout,
    pub time_format: TimeFormat,
    pub outcome: ProgramOutcome,
}
