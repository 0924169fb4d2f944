//! Reading a rendered row back as extraction output.
//!
//! The anchor and times are written the way the output columns show them, so
//! normalizing the entry again yields the fact the row was expanded from.

use hours_model::{OutputRow, RawEntry, WeekOfMonth};

use crate::time_format::{TimeFormat, render_time};

pub fn row_to_raw_entry(row: &OutputRow, format: TimeFormat) -> RawEntry {
    let anchor = match (row.specific_date, row.week_of_month, row.day_of_month, row.day_of_week) {
        (Some(date), ..) => date.to_string(),
        (None, Some(WeekOfMonth::Last), _, Some(day)) => format!("last {day}"),
        (None, Some(week), _, Some(day)) => format!("{} {day}", week.ordinal()),
        (None, None, Some(day_of_month), _) => day_of_month.to_string(),
        (None, _, _, Some(day)) => day.to_string(),
        _ => String::new(),
    };
    let times = row
        .populated_intervals()
        .flat_map(|interval| {
            [
                render_time(interval.open, format),
                render_time(interval.close, format),
            ]
        })
        .collect();
    RawEntry {
        anchor,
        times,
        closed: row.specific_date_closed,
        note: row.note.clone(),
        reason: row.specific_date_reason.clone(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use hours_model::{CalendarDate, DayOfWeek, Interval, ScheduleFact};

    use super::*;
    use crate::expand::expand;

    fn entry_for(fact: ScheduleFact) -> RawEntry {
        let rows = expand("P1", &[fact], &BTreeMap::new());
        row_to_raw_entry(&rows[0], TimeFormat::TwelveHour)
    }

    #[test]
    fn anchors_follow_the_recurrence_kind() {
        let entry = entry_for(ScheduleFact::NthWeekdayOfMonth {
            week_of_month: WeekOfMonth::Third,
            day_of_week: DayOfWeek::Saturday,
            intervals: vec![Interval::new(600, 840)],
            note: None,
        });
        assert_eq!(entry.anchor, "3rd Saturday");
        assert_eq!(entry.times, vec!["10:00 AM", "2:00 PM"]);

        let entry = entry_for(ScheduleFact::NthWeekdayOfMonth {
            week_of_month: WeekOfMonth::Last,
            day_of_week: DayOfWeek::Friday,
            intervals: vec![Interval::new(600, 840)],
            note: None,
        });
        assert_eq!(entry.anchor, "last Friday");

        let entry = entry_for(ScheduleFact::DayOfMonth {
            day_of_month: 15,
            intervals: vec![Interval::new(540, 720)],
            note: None,
        });
        assert_eq!(entry.anchor, "15");
    }

    #[test]
    fn closure_entry_is_closed_with_reason() {
        let entry = entry_for(ScheduleFact::SpecificDateClosure {
            date: CalendarDate::new(Some(2024), 7, 4).unwrap(),
            reason: Some("Independence Day".to_string()),
        });
        assert_eq!(entry.anchor, "07/04/2024");
        assert!(entry.closed);
        assert!(entry.times.is_empty());
        assert_eq!(entry.reason.as_deref(), Some("Independence Day"));
    }
}
