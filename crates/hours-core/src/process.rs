//! The stages for one program.

use hours_extract::ExtractionAdapter;
use hours_model::{CleansingError, CleansingNotice, OutputRow, ProgramInput, Stage};
use hours_normalize::normalize;
use hours_output::expand;
use hours_validate::validate;
use tracing::{debug, debug_span, info_span};

/// How a program ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramStatus {
    /// Rows were produced, possibly alongside errors for individual entries.
    Succeeded,
    /// No rows; at least one error explains why.
    Failed,
    /// No rows and nothing wrong: the hours text was blank or only described
    /// recurring closures.
    Empty,
}

/// Everything one program contributed to the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramOutcome {
    pub program_id: String,
    pub row_number: usize,
    pub status: ProgramStatus,
    pub rows: Vec<OutputRow>,
    pub errors: Vec<CleansingError>,
    pub notices: Vec<CleansingNotice>,
}

impl ProgramOutcome {
    fn new(input: &ProgramInput) -> Self {
        Self {
            program_id: input.program_id.clone(),
            row_number: input.row_number,
            status: ProgramStatus::Empty,
            rows: Vec::new(),
            errors: Vec::new(),
            notices: Vec::new(),
        }
    }

    fn error(&mut self, stage: Stage, message: impl Into<String>) {
        self.errors.push(CleansingError::new(
            self.program_id.clone(),
            self.row_number,
            stage,
            message,
        ));
    }

    fn notice(&mut self, message: impl Into<String>) {
        self.notices
            .push(CleansingNotice::new(self.program_id.clone(), message));
    }

    fn finish(mut self) -> Self {
        self.status = if !self.rows.is_empty() {
            ProgramStatus::Succeeded
        } else if !self.errors.is_empty() {
            ProgramStatus::Failed
        } else {
            ProgramStatus::Empty
        };
        self
    }
}

/// Run extraction, normalization, validation and expansion for one program.
///
/// Only extraction blocks; the other stages are pure.
pub fn process_program(
    adapter: &ExtractionAdapter,
    input: &ProgramInput,
    log_data: bool,
) -> ProgramOutcome {
    let span = info_span!("program", program_id = %input.program_id, row = input.row_number);
    let _guard = span.enter();
    let mut outcome = ProgramOutcome::new(input);

    // A blank id fails validation however the hours read; skip the call out.
    if input.program_id.trim().is_empty() {
        if let Err(errors) = validate(&input.program_id, &[]) {
            for error in errors {
                outcome.error(Stage::Validation, error.to_string());
            }
        }
        return outcome.finish();
    }

    if log_data {
        debug!(text = %input.raw_hours_text, "extracting");
    } else {
        debug!(chars = input.raw_hours_text.chars().count(), "extracting");
    }
    let raw = {
        let _stage = debug_span!("extract", collaborator = adapter.collaborator_name()).entered();
        match adapter.extract(&input.raw_hours_text, &input.context()) {
            Ok(raw) => raw,
            Err(error) => {
                outcome.error(Stage::Extraction, error.to_string());
                return outcome.finish();
            }
        }
    };
    if raw.is_empty() {
        debug!("no hours to normalize");
        return outcome.finish();
    }

    let normalized = {
        let _stage = debug_span!("normalize", entries = raw.entries.len()).entered();
        normalize(&raw)
    };
    for error in &normalized.errors {
        outcome.error(Stage::Normalization, error.to_string());
    }
    for notice in normalized.notices {
        outcome.notice(notice);
    }
    if normalized.facts.is_empty() {
        return outcome.finish();
    }

    let _stage = debug_span!("validate", facts = normalized.facts.len()).entered();
    match validate(&input.program_id, &normalized.facts) {
        Ok(validated) => {
            for notice in validated.notices {
                outcome.notice(notice);
            }
            outcome.rows = expand(&input.program_id, &validated.facts, &input.pass_through);
        }
        Err(errors) => {
            for error in errors {
                outcome.error(Stage::Validation, error.to_string());
            }
        }
    }
    outcome.finish()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use hours_extract::{CollaboratorError, MockCollaborator, PlaintextExtractor, RetryPolicy};
    use hours_model::{DayOfWeek, RawEntry, RawFacts};

    use super::*;

    fn plaintext() -> ExtractionAdapter {
        ExtractionAdapter::new(Arc::new(PlaintextExtractor::new()))
    }

    #[test]
    fn weekday_range_and_closure_make_four_rows() {
        let input = ProgramInput::new("P1", "Mon-Wed 9am-5pm, closed 12/25");
        let outcome = process_program(&plaintext(), &input, false);
        assert_eq!(outcome.status, ProgramStatus::Succeeded);
        assert_eq!(outcome.rows.len(), 4);
        assert_eq!(outcome.rows[0].day_of_week, Some(DayOfWeek::Monday));
        assert!(outcome.rows[3].specific_date_closed);
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn unanchored_hours_fail_at_normalization() {
        let outcome = process_program(&plaintext(), &ProgramInput::new("P2", "9-5"), false);
        assert_eq!(outcome.status, ProgramStatus::Failed);
        assert!(outcome.rows.is_empty());
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].stage, Stage::Normalization);
        assert!(outcome.errors[0].message.contains("no recurrence anchor found"));
    }

    #[test]
    fn blank_text_is_empty_not_failed() {
        let outcome = process_program(&plaintext(), &ProgramInput::new("P3", "  "), false);
        assert_eq!(outcome.status, ProgramStatus::Empty);
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn blank_program_id_fails_validation_without_extraction() {
        let mock = Arc::new(MockCollaborator::new());
        let adapter = ExtractionAdapter::new(mock.clone());
        let outcome = process_program(&adapter, &ProgramInput::new(" ", "Mon 9-5"), false);
        assert_eq!(outcome.status, ProgramStatus::Failed);
        assert_eq!(outcome.errors[0].stage, Stage::Validation);
        assert_eq!(mock.calls(), 0);
    }

    #[test]
    fn extraction_failure_is_tagged() {
        let mock = Arc::new(
            MockCollaborator::new()
                .with_failures("Sat 10-2", [CollaboratorError::Unparseable("prose".into())]),
        );
        let adapter = ExtractionAdapter::new(mock).with_retry(RetryPolicy::none());
        let outcome = process_program(&adapter, &ProgramInput::new("P4", "Sat 10-2"), false);
        assert_eq!(outcome.status, ProgramStatus::Failed);
        assert_eq!(outcome.errors[0].stage, Stage::Extraction);
    }

    #[test]
    fn duplicate_weekly_facts_reject_the_program() {
        let raw = RawFacts::new(vec![
            RawEntry::open("Mon", &["9am", "12pm"]),
            RawEntry::open("Monday", &["1pm", "4pm"]),
        ]);
        let mock = Arc::new(MockCollaborator::new().with_response("Mon twice", raw));
        let outcome = process_program(
            &ExtractionAdapter::new(mock),
            &ProgramInput::new("P5", "Mon twice"),
            false,
        );
        assert_eq!(outcome.status, ProgramStatus::Failed);
        assert!(outcome.rows.is_empty());
        assert!(outcome.errors.iter().all(|error| error.stage == Stage::Validation));
    }

    #[test]
    fn partial_normalization_keeps_good_facts() {
        let raw = RawFacts::new(vec![
            RawEntry::open("Tue", &["9am", "5pm"]),
            RawEntry::open("Wed", &["9am"]),
        ]);
        let mock = Arc::new(MockCollaborator::new().with_response("mixed", raw));
        let outcome = process_program(
            &ExtractionAdapter::new(mock),
            &ProgramInput::new("P6", "mixed"),
            false,
        );
        assert_eq!(outcome.status, ProgramStatus::Succeeded);
        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].stage, Stage::Normalization);
    }

    #[test]
    fn closure_overrides_specific_date_with_notice() {
        let raw = RawFacts::new(vec![
            RawEntry::open("12/24", &["9am", "12pm"]),
            RawEntry::closed("12/24").with_reason("Christmas Eve"),
        ]);
        let mock = Arc::new(MockCollaborator::new().with_response("eve", raw));
        let outcome = process_program(
            &ExtractionAdapter::new(mock),
            &ProgramInput::new("P7", "eve"),
            false,
        );
        assert_eq!(outcome.rows.len(), 1);
        assert!(outcome.rows[0].specific_date_closed);
        assert_eq!(outcome.notices.len(), 1);
    }
}
