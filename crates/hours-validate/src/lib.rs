//! Per-program validation of normalized schedule facts.
//!
//! Validation is all-or-nothing: a program's facts are accepted together or
//! rejected with every violation found. Facts are never edited; the only
//! transformation is dropping a specific-date opening that a closure for the
//! same date overrides, which is reported as a notice.

mod checks;

use hours_model::{ScheduleFact, ValidationError};
use tracing::debug;

/// Facts accepted for expansion, plus informational notices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validated {
    pub facts: Vec<ScheduleFact>,
    pub notices: Vec<String>,
}

/// Validate one program's facts.
pub fn validate(
    program_id: &str,
    facts: &[ScheduleFact],
) -> Result<Validated, Vec<ValidationError>> {
    let (accepted, notices) = apply_closure_precedence(facts);
    let errors = checks::run_all(program_id, &accepted);
    if !errors.is_empty() {
        debug!(program_id, errors = errors.len(), "validation failed");
        return Err(errors);
    }
    Ok(Validated {
        facts: accepted,
        notices,
    })
}

/// Drop specific-date openings that coincide with a closure.
fn apply_closure_precedence(facts: &[ScheduleFact]) -> (Vec<ScheduleFact>, Vec<String>) {
    let closures: Vec<_> = facts
        .iter()
        .filter(|fact| fact.is_closure())
        .filter_map(ScheduleFact::date)
        .collect();

    let mut accepted = Vec::with_capacity(facts.len());
    let mut notices = Vec::new();
    for fact in facts {
        if let ScheduleFact::SpecificDate { date, .. } = fact
            && closures.iter().any(|closed| closed.coincides_with(date))
        {
            notices.push(format!(
                "opening hours for {date} dropped: the program is closed that day"
            ));
            continue;
        }
        accepted.push(fact.clone());
    }
    (accepted, notices)
}
