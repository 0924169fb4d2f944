use serde::{Deserialize, Serialize};
use std::fmt;

/// Pipeline stage a diagnostic originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Extraction,
    Normalization,
    Validation,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Extraction => "extraction",
            Stage::Normalization => "normalization",
            Stage::Validation => "validation",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A program that could not be fully resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleansingError {
    pub program_id: String,
    /// 1-based data row in the input file, so operators can find the source.
    pub row_number: usize,
    pub stage: Stage,
    pub message: String,
}

impl CleansingError {
    pub fn new(
        program_id: impl Into<String>,
        row_number: usize,
        stage: Stage,
        message: impl Into<String>,
    ) -> Self {
        Self {
            program_id: program_id.into(),
            row_number,
            stage,
            message: message.into(),
        }
    }
}

impl fmt::Display for CleansingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (row {}) [{}]: {}",
            self.program_id, self.row_number, self.stage, self.message
        )
    }
}

/// Informational, non-fatal observation about a program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleansingNotice {
    pub program_id: String,
    pub message: String,
}

impl CleansingNotice {
    pub fn new(program_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            program_id: program_id.into(),
            message: message.into(),
        }
    }
}
