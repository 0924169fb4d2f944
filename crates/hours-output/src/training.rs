//! Fine-tuning data export.
//!
//! Each input row becomes one JSON line `{"prompt": ..., "completion": ...}`
//! with the completion terminated by the `%%` stop sequence the completions
//! client sends.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use hours_ingest::CsvTable;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ensure_parent_dir;

/// Stop sequence appended to every completion.
pub const COMPLETION_STOP: &str = "%%";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub prompt: String,
    pub completion: String,
}

/// Pair `input_column` with `output_column` for every row.
///
/// Rows whose prompt is blank are skipped.
pub fn training_examples(
    table: &CsvTable,
    input_column: &str,
    output_column: &str,
) -> Result<Vec<TrainingExample>> {
    let Some(input_index) = table.column_index(input_column) else {
        bail!("input column '{input_column}' not found");
    };
    let Some(output_index) = table.column_index(output_column) else {
        bail!("output column '{output_column}' not found");
    };
    Ok(table
        .rows
        .iter()
        .filter(|row| !row[input_index].trim().is_empty())
        .map(|row| TrainingExample {
            prompt: row[input_index].clone(),
            completion: format!("{}{COMPLETION_STOP}", row[output_index]),
        })
        .collect())
}

pub fn write_training_jsonl(path: &Path, examples: &[TrainingExample]) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for example in examples {
        serde_json::to_writer(&mut writer, example)
            .with_context(|| format!("write {}", path.display()))?;
        writer
            .write_all(b"\n")
            .with_context(|| format!("write {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    info!(path = %path.display(), examples = examples.len(), "wrote training data");
    Ok(())
}
