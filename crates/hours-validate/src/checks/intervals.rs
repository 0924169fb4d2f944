//! Interval invariants for every fact that opens.

use hours_model::{Interval, MAX_INTERVALS, MINUTES_PER_DAY, ScheduleFact, ValidationError};

pub fn check(facts: &[ScheduleFact]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for fact in facts.iter().filter(|fact| !fact.is_closure()) {
        let key = fact.key();
        let intervals = fact.intervals();

        if intervals.is_empty() {
            errors.push(ValidationError::NoIntervals { key });
            continue;
        }
        if intervals.len() > MAX_INTERVALS {
            errors.push(ValidationError::TooManyIntervals {
                key,
                count: intervals.len(),
            });
        }

        for interval in intervals {
            if out_of_range(interval) {
                errors.push(ValidationError::OutOfRange {
                    key,
                    interval: *interval,
                });
            } else if !interval.is_well_formed() {
                errors.push(ValidationError::InvertedInterval {
                    key,
                    interval: *interval,
                });
            }
        }

        // The normalizer sorts what it emits; this catches fact sets built or
        // deserialized elsewhere.
        if intervals.windows(2).any(|pair| pair[0].open > pair[1].open) {
            errors.push(ValidationError::UnorderedIntervals { key });
        }

        for (index, first) in intervals.iter().enumerate() {
            for second in &intervals[index + 1..] {
                if first.overlaps(second) {
                    errors.push(ValidationError::OverlappingIntervals {
                        key,
                        first: *first,
                        second: *second,
                    });
                }
            }
        }
    }

    errors
}

fn out_of_range(interval: &Interval) -> bool {
    interval.open >= MINUTES_PER_DAY || interval.close > MINUTES_PER_DAY
}
