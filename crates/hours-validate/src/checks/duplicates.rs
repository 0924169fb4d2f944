//! Duplicate fact detection.
//!
//! Facts sharing a `FactKey` describe the same day. They are reported, never
//! merged; a key is reported once however many times it repeats.

use std::collections::BTreeSet;

use hours_model::{ScheduleFact, ValidationError};

pub fn check(facts: &[ScheduleFact]) -> Vec<ValidationError> {
    let mut seen = BTreeSet::new();
    let mut reported = BTreeSet::new();
    let mut errors = Vec::new();

    for fact in facts {
        let key = fact.key();
        if !seen.insert(key) && reported.insert(key) {
            errors.push(ValidationError::DuplicateFact { key });
        }
    }

    errors
}
