use hours_model::{ScheduleFact, ValidationError};

pub fn check(facts: &[ScheduleFact]) -> Vec<ValidationError> {
    facts
        .iter()
        .filter_map(|fact| match fact {
            ScheduleFact::DayOfMonth { day_of_month, .. } if !(1..=31).contains(day_of_month) => {
                Some(ValidationError::InvalidDayOfMonth { day: *day_of_month })
            }
            _ => None,
        })
        .collect()
}
