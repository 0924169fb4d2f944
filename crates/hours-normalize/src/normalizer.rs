//! RawFacts to ScheduleFact conversion.

use hours_model::{
    Interval, MAX_INTERVALS, NormalizationError, RawEntry, RawFacts, ScheduleFact,
};
use tracing::{debug, trace};

use crate::anchor::{Anchor, AnchorError, mentions_closure, parse_anchor};
use crate::time::{parse_time_token, resolve_interval};

/// Result of normalizing one program's extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalized {
    /// Facts in discovery order.
    pub facts: Vec<ScheduleFact>,
    /// One error per skipped entry or interval.
    pub errors: Vec<NormalizationError>,
    /// Observations that are not failures (e.g. recurring closures).
    pub notices: Vec<String>,
}

impl Normalized {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Normalize every entry of `raw` in order.
///
/// A bad entry never stops the others: it contributes an error and no facts.
pub fn normalize(raw: &RawFacts) -> Normalized {
    let mut normalized = Normalized::default();
    for (index, entry) in raw.entries.iter().enumerate() {
        normalize_entry(index + 1, entry, &mut normalized);
    }
    debug!(
        entries = raw.entries.len(),
        facts = normalized.facts.len(),
        errors = normalized.errors.len(),
        "normalized raw facts"
    );
    normalized
}

fn normalize_entry(number: usize, entry: &RawEntry, out: &mut Normalized) {
    let anchor_text = entry.anchor.trim();
    let note = non_blank(entry.note.as_deref());
    let times = split_time_tokens(&entry.times);
    let closed = entry.closed || mentions_closure(anchor_text);
    trace!(entry = number, anchor = anchor_text, closed, "normalizing entry");

    let anchor = match parse_anchor(anchor_text) {
        Ok(anchor) => anchor,
        Err(AnchorError::Empty) if closed => {
            out.notices
                .push(format!("entry {number}: closure without a date ignored"));
            return;
        }
        Err(AnchorError::Empty) => {
            if !times.is_empty() {
                out.errors.push(NormalizationError::NoAnchor { entry: number });
            }
            return;
        }
        Err(AnchorError::Unrecognized) if closed => {
            out.notices.push(format!(
                "entry {number}: closure '{anchor_text}' has no calendar date; no fact emitted"
            ));
            return;
        }
        Err(AnchorError::Unrecognized) => {
            out.errors.push(NormalizationError::UnknownAnchor {
                entry: number,
                anchor: anchor_text.to_string(),
            });
            return;
        }
        Err(AnchorError::InvalidDate) => {
            out.errors.push(NormalizationError::InvalidDate {
                entry: number,
                anchor: anchor_text.to_string(),
            });
            return;
        }
    };

    if closed {
        match anchor {
            Anchor::Dates(dates) => {
                if !times.is_empty() {
                    out.notices.push(format!(
                        "entry {number}: hours given for closure '{anchor_text}' were ignored"
                    ));
                }
                let reason = non_blank(entry.reason.as_deref()).or(note);
                out.facts
                    .extend(dates.into_iter().map(|date| ScheduleFact::SpecificDateClosure {
                        date,
                        reason: reason.clone(),
                    }));
            }
            _ => out.notices.push(format!(
                "entry {number}: recurring closure '{anchor_text}' carries no hours; no fact emitted"
            )),
        }
        return;
    }

    let Some(intervals) = entry_intervals(number, anchor_text, &times, &mut out.errors) else {
        return;
    };

    match anchor {
        Anchor::Dates(dates) => out.facts.extend(dates.into_iter().map(|date| {
            ScheduleFact::SpecificDate {
                date,
                intervals: intervals.clone(),
                note: note.clone(),
            }
        })),
        Anchor::DaysOfMonth(days) => out.facts.extend(days.into_iter().map(|day_of_month| {
            ScheduleFact::DayOfMonth {
                day_of_month,
                intervals: intervals.clone(),
                note: note.clone(),
            }
        })),
        Anchor::NthWeekdays(pairs) => out.facts.extend(pairs.into_iter().map(
            |(week_of_month, day_of_week)| ScheduleFact::NthWeekdayOfMonth {
                week_of_month,
                day_of_week,
                intervals: intervals.clone(),
                note: note.clone(),
            },
        )),
        Anchor::Weekdays(days) => out.facts.extend(days.into_iter().map(|day_of_week| {
            ScheduleFact::Weekly {
                day_of_week,
                intervals: intervals.clone(),
                note: note.clone(),
            }
        })),
    }
}

/// Pair time tokens into intervals, sorted by open.
///
/// `None` means the entry yields no facts; the reason is already recorded.
fn entry_intervals(
    number: usize,
    anchor: &str,
    times: &[String],
    errors: &mut Vec<NormalizationError>,
) -> Option<Vec<Interval>> {
    if times.is_empty() {
        errors.push(NormalizationError::MissingTimes {
            entry: number,
            anchor: anchor.to_string(),
        });
        return None;
    }
    if times.len() % 2 != 0 {
        errors.push(NormalizationError::IncompleteInterval {
            entry: number,
            anchor: anchor.to_string(),
            count: times.len(),
        });
        return None;
    }
    let pairs = times.len() / 2;
    if pairs > MAX_INTERVALS {
        errors.push(NormalizationError::TooManyIntervals {
            entry: number,
            anchor: anchor.to_string(),
            count: pairs,
        });
        return None;
    }

    let mut intervals = Vec::with_capacity(pairs);
    for pair in times.chunks_exact(2) {
        let parsed: Vec<_> = pair
            .iter()
            .map(|token| parse_time_token(token).ok_or(token))
            .collect();
        match (&parsed[0], &parsed[1]) {
            (Ok(open), Ok(close)) => intervals.push(resolve_interval(*open, *close)),
            (Err(token), _) | (_, Err(token)) => {
                errors.push(NormalizationError::UnparseableTime {
                    entry: number,
                    anchor: anchor.to_string(),
                    token: (*token).clone(),
                });
            }
        }
    }
    if intervals.is_empty() {
        return None;
    }
    intervals.sort();
    Some(intervals)
}

/// Split combined tokens such as "9am-5pm" or "9 to 5" into their halves.
fn split_time_tokens(times: &[String]) -> Vec<String> {
    times
        .iter()
        .flat_map(|token| {
            token
                .replace(['\u{2013}', '\u{2014}'], "-")
                .replace(" to ", "-")
                .split('-')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

fn non_blank(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hours_model::{DayOfWeek, WeekOfMonth};

    fn run(entries: Vec<RawEntry>) -> Normalized {
        normalize(&RawFacts::new(entries))
    }

    #[test]
    fn weekly_range_expands_per_day() {
        let result = run(vec![RawEntry::open("Mon-Wed", &["9am", "5pm"])]);
        assert!(result.is_clean());
        let days: Vec<_> = result.facts.iter().filter_map(ScheduleFact::day_of_week).collect();
        assert_eq!(
            days,
            vec![DayOfWeek::Monday, DayOfWeek::Tuesday, DayOfWeek::Wednesday]
        );
        assert!(
            result
                .facts
                .iter()
                .all(|fact| fact.intervals() == [Interval::new(540, 1020)])
        );
    }

    #[test]
    fn times_without_anchor_are_an_error() {
        let result = run(vec![RawEntry::open("", &["9", "5"])]);
        assert!(result.facts.is_empty());
        assert_eq!(result.errors, vec![NormalizationError::NoAnchor { entry: 1 }]);
        assert_eq!(
            result.errors[0].to_string(),
            "entry 1: no recurrence anchor found"
        );
    }

    #[test]
    fn odd_time_count_skips_only_that_entry() {
        let result = run(vec![
            RawEntry::open("Mon", &["9am", "5pm", "6pm"]),
            RawEntry::open("Tue", &["9am", "5pm"]),
        ]);
        assert_eq!(result.facts.len(), 1);
        assert!(matches!(
            result.errors[0],
            NormalizationError::IncompleteInterval { entry: 1, count: 3, .. }
        ));
    }

    #[test]
    fn unparseable_time_skips_only_that_interval() {
        let result = run(vec![RawEntry::open("Sat", &["9am", "noonish", "1pm", "3pm"])]);
        assert_eq!(result.facts.len(), 1);
        assert_eq!(result.facts[0].intervals(), [Interval::new(780, 900)]);
        assert!(matches!(
            &result.errors[0],
            NormalizationError::UnparseableTime { token, .. } if token == "noonish"
        ));
    }

    #[test]
    fn intervals_are_sorted_and_capped() {
        let result = run(vec![RawEntry::open("Fri", &["1pm", "3pm", "9am", "11am"])]);
        assert_eq!(
            result.facts[0].intervals(),
            [Interval::new(540, 660), Interval::new(780, 900)]
        );

        let result = run(vec![RawEntry::open(
            "Fri",
            &["8", "9", "10", "11", "12", "1", "2", "3"],
        )]);
        assert!(result.facts.is_empty());
        assert!(matches!(
            result.errors[0],
            NormalizationError::TooManyIntervals { count: 4, .. }
        ));
    }

    #[test]
    fn dated_closure_and_recurring_closure() {
        let result = run(vec![
            RawEntry::closed("12/25").with_reason("Christmas"),
            RawEntry::closed("holidays"),
            RawEntry::closed("Sundays"),
        ]);
        assert!(result.is_clean());
        assert_eq!(result.facts.len(), 1);
        assert_eq!(result.facts[0].to_string(), "closed 12/25 (Christmas)");
        assert_eq!(result.notices.len(), 2);
    }

    #[test]
    fn closed_word_in_anchor_marks_closure() {
        let result = run(vec![RawEntry::open("closed 7/4", &[])]);
        assert!(result.facts[0].is_closure());
    }

    #[test]
    fn nth_weekday_and_specific_date_carry_notes() {
        let result = run(vec![
            RawEntry::open("3rd Sat", &["10", "2"]).with_note("produce only"),
            RawEntry::open("11/26/2024", &["10am", "noon"]),
        ]);
        assert!(result.is_clean());
        assert_eq!(
            result.facts[0],
            ScheduleFact::NthWeekdayOfMonth {
                week_of_month: WeekOfMonth::Third,
                day_of_week: DayOfWeek::Saturday,
                intervals: vec![Interval::new(600, 840)],
                note: Some("produce only".to_string()),
            }
        );
        assert_eq!(result.facts[1].intervals(), [Interval::new(600, 720)]);
    }

    #[test]
    fn combined_range_tokens_are_split() {
        let result = run(vec![RawEntry::open("Thu", &["9am-12pm", "1pm - 4pm"])]);
        assert_eq!(
            result.facts[0].intervals(),
            [Interval::new(540, 720), Interval::new(780, 960)]
        );
    }

    #[test]
    fn anchor_without_times_is_missing_times() {
        let result = run(vec![RawEntry::open("Wednesday", &[])]);
        assert!(matches!(
            result.errors[0],
            NormalizationError::MissingTimes { entry: 1, .. }
        ));
    }
}
