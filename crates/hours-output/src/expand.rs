//! Row expansion: one output row per accepted schedule fact.

use std::collections::BTreeMap;

use hours_model::{MAX_INTERVALS, OutputRow, ScheduleFact};

/// Materialize one row per fact, in fact order.
///
/// Up to three intervals fill the open/close groups of a single row. The
/// pass-through columns are copied onto every row of the program.
pub fn expand(
    program_id: &str,
    facts: &[ScheduleFact],
    pass_through: &BTreeMap<String, String>,
) -> Vec<OutputRow> {
    facts
        .iter()
        .map(|fact| expand_fact(program_id, fact, pass_through))
        .collect()
}

fn expand_fact(
    program_id: &str,
    fact: &ScheduleFact,
    pass_through: &BTreeMap<String, String>,
) -> OutputRow {
    let mut intervals = [None; MAX_INTERVALS];
    for (slot, interval) in intervals.iter_mut().zip(fact.intervals()) {
        *slot = Some(*interval);
    }
    let mut row = OutputRow {
        program_id: program_id.to_string(),
        day_of_week: None,
        week_of_month: None,
        day_of_month: None,
        specific_date: None,
        specific_date_closed: false,
        specific_date_reason: None,
        intervals,
        note: fact.note().map(str::to_string),
        pass_through: pass_through.clone(),
    };
    match fact {
        ScheduleFact::Weekly { day_of_week, .. } => row.day_of_week = Some(*day_of_week),
        ScheduleFact::NthWeekdayOfMonth {
            week_of_month,
            day_of_week,
            ..
        } => {
            row.week_of_month = Some(*week_of_month);
            row.day_of_week = Some(*day_of_week);
        }
        ScheduleFact::DayOfMonth { day_of_month, .. } => row.day_of_month = Some(*day_of_month),
        ScheduleFact::SpecificDate { date, .. } => row.specific_date = Some(*date),
        ScheduleFact::SpecificDateClosure { date, reason } => {
            row.specific_date = Some(*date);
            row.specific_date_closed = true;
            row.specific_date_reason = reason.clone();
        }
    }
    row
}
