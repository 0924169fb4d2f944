//! Output generation for cleansed hours.
//!
//! - **expand**: one `OutputRow` per schedule fact
//! - **layout** / **csv_writer**: the output column set and CSV rendering
//! - **error_report**: per-program failures as CSV
//! - **manifest**: JSON run summary with the input checksum
//! - **round_trip**: read a rendered row back as extraction output
//! - **training**: prompt/completion JSONL for fine-tuning the extractor

pub mod csv_writer;
pub mod error_report;
pub mod expand;
pub mod layout;
pub mod manifest;
pub mod round_trip;
pub mod time_format;
pub mod training;

pub use csv_writer::{render_record, write_rows, write_rows_csv};
pub use error_report::{write_error_report, write_error_report_csv};
pub use expand::expand;
pub use layout::{ColumnSource, OutputColumn, OutputLayout};
pub use manifest::{ProgramCounts, RunManifest, compute_file_sha256, timestamp_now, write_manifest};
pub use round_trip::row_to_raw_entry;
pub use time_format::{TimeFormat, render_time};
pub use training::{TrainingExample, training_examples, write_training_jsonl};

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Ensure a parent directory exists for a file path.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    Ok(())
}
