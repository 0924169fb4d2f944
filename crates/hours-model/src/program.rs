use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One program row from the input table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramInput {
    /// Value of `Program External ID`; blank ids are rejected at validation.
    pub program_id: String,
    /// Plaintext hours to cleanse (may be empty).
    pub raw_hours_text: String,
    /// Columns outside the hours schema, keyed by header, copied verbatim to output.
    pub pass_through: BTreeMap<String, String>,
    /// 1-based data row number in the source file.
    pub row_number: usize,
}

impl ProgramInput {
    pub fn new(program_id: impl Into<String>, raw_hours_text: impl Into<String>) -> Self {
        Self {
            program_id: program_id.into(),
            raw_hours_text: raw_hours_text.into(),
            pass_through: BTreeMap::new(),
            row_number: 0,
        }
    }

    #[must_use]
    pub fn with_column(mut self, header: impl Into<String>, value: impl Into<String>) -> Self {
        self.pass_through.insert(header.into(), value.into());
        self
    }

    pub fn context(&self) -> ProgramContext {
        ProgramContext {
            program_id: self.program_id.clone(),
            row_number: self.row_number,
        }
    }
}

/// Minimal hints passed alongside the plaintext to the extraction collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramContext {
    pub program_id: String,
    pub row_number: usize,
}
