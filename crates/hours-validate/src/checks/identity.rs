//! Program identifier presence.

use hours_model::ValidationError;

pub fn check(program_id: &str) -> Option<ValidationError> {
    program_id
        .trim()
        .is_empty()
        .then_some(ValidationError::MissingProgramId)
}
