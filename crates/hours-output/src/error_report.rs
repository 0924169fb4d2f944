//! Per-program failure report.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use hours_model::CleansingError;
use tracing::info;

use crate::ensure_parent_dir;

const HEADER: [&str; 3] = ["program_id", "stage", "message"];

/// Write `program_id,stage,message` records, one per error, in input order.
pub fn write_error_report<W: Write>(writer: W, errors: &[CleansingError]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER).context("write error report header")?;
    for error in errors {
        csv_writer
            .write_record([
                error.program_id.as_str(),
                error.stage.as_str(),
                error.message.as_str(),
            ])
            .with_context(|| format!("write error for program {}", error.program_id))?;
    }
    csv_writer.flush().context("flush error report")?;
    Ok(())
}

pub fn write_error_report_csv(path: &Path, errors: &[CleansingError]) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_error_report(BufWriter::new(file), errors)?;
    info!(path = %path.display(), errors = errors.len(), "wrote error report");
    Ok(())
}
