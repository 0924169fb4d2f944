//! Program table to `ProgramInput` conversion.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use hours_model::columns::{PROGRAM_ID_COLUMN, UNCLEANED_COLUMN};
use hours_model::{HoursColumn, InputSchemaError, ProgramInput};
use tracing::info;

use crate::csv_table::{CsvTable, read_csv_table};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOptions {
    /// Header of the column holding the plaintext hours.
    pub uncleaned_column: String,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            uncleaned_column: UNCLEANED_COLUMN.to_string(),
        }
    }
}

/// Programs in input order, plus the input header row for output layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramSet {
    pub headers: Vec<String>,
    /// Header of the uncleaned hours column as spelled in the input.
    pub uncleaned_column: String,
    pub programs: Vec<ProgramInput>,
}

impl ProgramSet {
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}

pub fn load_programs(path: &Path, options: &IngestOptions) -> Result<ProgramSet> {
    let table = read_csv_table(path)?;
    let set = programs_from_table(table, options)?;
    info!(
        path = %path.display(),
        programs = set.len(),
        "loaded program table"
    );
    Ok(set)
}

/// Check the schema and build one `ProgramInput` per data row.
///
/// Fails on the first schema problem: missing required columns, a repeated
/// header or a program id that appears twice.
pub fn programs_from_table(
    table: CsvTable,
    options: &IngestOptions,
) -> std::result::Result<ProgramSet, InputSchemaError> {
    if table.headers.is_empty() {
        return Err(InputSchemaError::Empty);
    }
    table.check_unique_headers()?;

    let mut missing = Vec::new();
    let mut required: Vec<&str> = vec![PROGRAM_ID_COLUMN];
    required.extend(HoursColumn::REQUIRED.iter().map(|column| column.header()));
    required.push(options.uncleaned_column.as_str());
    for name in required {
        if table.column_index(name).is_none() {
            missing.push(name.to_string());
        }
    }
    if !missing.is_empty() {
        return Err(InputSchemaError::MissingColumns { columns: missing });
    }

    // Both lookups succeeded above.
    let id_index = table.column_index(PROGRAM_ID_COLUMN).unwrap_or_default();
    let text_index = table
        .column_index(&options.uncleaned_column)
        .unwrap_or_default();
    let uncleaned_column = table.headers[text_index].clone();
    let pass_through_indices: Vec<usize> = table
        .headers
        .iter()
        .enumerate()
        .filter(|(index, header)| *index != id_index && HoursColumn::from_header(header).is_none())
        .map(|(index, _)| index)
        .collect();

    let mut first_seen: HashMap<String, usize> = HashMap::new();
    let mut programs = Vec::with_capacity(table.rows.len());
    for (index, row) in table.rows.iter().enumerate() {
        let row_number = index + 1;
        let program_id = row[id_index].clone();
        if !program_id.is_empty() {
            if let Some(first_row) = first_seen.get(&program_id) {
                return Err(InputSchemaError::DuplicateProgramId {
                    program_id,
                    first_row: *first_row,
                    duplicate_row: row_number,
                });
            }
            first_seen.insert(program_id.clone(), row_number);
        }
        let pass_through: BTreeMap<String, String> = pass_through_indices
            .iter()
            .map(|&column| (table.headers[column].clone(), row[column].clone()))
            .collect();
        programs.push(ProgramInput {
            program_id,
            raw_hours_text: row[text_index].clone(),
            pass_through,
            row_number,
        });
    }

    Ok(ProgramSet {
        headers: table.headers,
        uncleaned_column,
        programs,
    })
}
