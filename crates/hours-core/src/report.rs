use hours_model::{CleansingError, CleansingNotice, OutputRow};
use hours_output::ProgramCounts;

use crate::process::{ProgramOutcome, ProgramStatus};

/// The two-part result of a run: best-effort rows and per-program diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleansingReport {
    pub rows: Vec<OutputRow>,
    pub errors: Vec<CleansingError>,
    pub notices: Vec<CleansingNotice>,
    pub counts: ProgramCounts,
    /// Programs never started because the run was cancelled.
    pub skipped: usize,
    pub cancelled: bool,
}

impl CleansingReport {
    /// Fold one program's outcome in; its rows stay contiguous.
    pub fn record(&mut self, outcome: ProgramOutcome) {
        self.counts.total += 1;
        match outcome.status {
            ProgramStatus::Succeeded => self.counts.succeeded += 1,
            ProgramStatus::Failed => self.counts.failed += 1,
            ProgramStatus::Empty => self.counts.empty += 1,
        }
        self.rows.extend(outcome.rows);
        self.errors.extend(outcome.errors);
        self.notices.extend(outcome.notices);
    }

    /// True when any program reported an error, including fact-level ones.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
