//! Validation check modules.
//!
//! Each module checks one family of invariants and returns every violation
//! it finds; nothing stops at the first error.

mod calendar;
mod duplicates;
mod identity;
mod intervals;

use hours_model::{ScheduleFact, ValidationError};

/// Run all checks over one program's facts.
pub fn run_all(program_id: &str, facts: &[ScheduleFact]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // 1. Program identity
    errors.extend(identity::check(program_id));

    // 2. At most one fact per day, recurrence slot or date
    errors.extend(duplicates::check(facts));

    // 3. Interval shape, order, overlap and count
    errors.extend(intervals::check(facts));

    // 4. Day-of-month range
    errors.extend(calendar::check(facts));

    errors
}
