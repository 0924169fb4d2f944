//! Resolve which facts apply on a concrete date.
//!
//! Precedence, highest first: a closure for the date, a specific-date opening,
//! then every recurring fact (weekly, nth weekday, day of month) matching the
//! date. Recurring facts are additive.

use chrono::{Datelike, NaiveDate};

use crate::{DayOfWeek, Interval, ScheduleFact, WeekOfMonth};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayResolution<'a> {
    /// A closure names this date; nothing else applies.
    Closed(&'a ScheduleFact),
    /// A specific-date opening replaces the recurring pattern.
    SpecificDate(&'a ScheduleFact),
    /// Recurring facts matching the date, in fact order.
    Recurring(Vec<&'a ScheduleFact>),
    /// No fact covers the date.
    Unscheduled,
}

impl DayResolution<'_> {
    pub fn is_closed(&self) -> bool {
        matches!(self, DayResolution::Closed(_))
    }

    /// Open intervals for the day, sorted by start.
    pub fn intervals(&self) -> Vec<Interval> {
        let mut intervals: Vec<Interval> = match self {
            DayResolution::Closed(_) | DayResolution::Unscheduled => Vec::new(),
            DayResolution::SpecificDate(fact) => fact.intervals().to_vec(),
            DayResolution::Recurring(facts) => facts
                .iter()
                .flat_map(|fact| fact.intervals().iter().copied())
                .collect(),
        };
        intervals.sort();
        intervals
    }
}

pub fn resolve_day(facts: &[ScheduleFact], date: NaiveDate) -> DayResolution<'_> {
    if let Some(closure) = facts
        .iter()
        .find(|fact| fact.is_closure() && fact.date().is_some_and(|d| d.matches(date)))
    {
        return DayResolution::Closed(closure);
    }
    if let Some(opening) = facts.iter().find(|fact| {
        matches!(fact, ScheduleFact::SpecificDate { date: d, .. } if d.matches(date))
    }) {
        return DayResolution::SpecificDate(opening);
    }
    let recurring: Vec<&ScheduleFact> = facts
        .iter()
        .filter(|fact| recurring_applies(fact, date))
        .collect();
    if recurring.is_empty() {
        DayResolution::Unscheduled
    } else {
        DayResolution::Recurring(recurring)
    }
}

fn recurring_applies(fact: &ScheduleFact, date: NaiveDate) -> bool {
    let weekday = DayOfWeek::from_chrono(date.weekday());
    match fact {
        ScheduleFact::Weekly { day_of_week, .. } => *day_of_week == weekday,
        ScheduleFact::NthWeekdayOfMonth {
            week_of_month,
            day_of_week,
            ..
        } => *day_of_week == weekday && week_matches(*week_of_month, date),
        ScheduleFact::DayOfMonth { day_of_month, .. } => u32::from(*day_of_month) == date.day(),
        ScheduleFact::SpecificDate { .. } | ScheduleFact::SpecificDateClosure { .. } => false,
    }
}

/// True when `date` falls in the given week of its month (by weekday count).
pub fn week_matches(week: WeekOfMonth, date: NaiveDate) -> bool {
    match week.number() {
        Some(number) => (date.day() - 1) / 7 + 1 == number,
        None => date.day() + 7 > days_in_month(date),
    }
}

fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.pred_opt())
        .map_or(31, |last| last.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn weekly(day: DayOfWeek) -> ScheduleFact {
        ScheduleFact::Weekly {
            day_of_week: day,
            intervals: vec![Interval::new(540, 1020)],
            note: None,
        }
    }

    #[test]
    fn closure_beats_weekly_pattern() {
        // 2024-12-25 is a Wednesday.
        let facts = vec![
            weekly(DayOfWeek::Wednesday),
            ScheduleFact::SpecificDateClosure {
                date: "12/25".parse().unwrap(),
                reason: None,
            },
        ];
        assert!(resolve_day(&facts, date(2024, 12, 25)).is_closed());
        assert_eq!(
            resolve_day(&facts, date(2024, 12, 18)).intervals(),
            vec![Interval::new(540, 1020)]
        );
    }

    #[test]
    fn specific_date_replaces_recurring_hours() {
        let facts = vec![
            weekly(DayOfWeek::Tuesday),
            ScheduleFact::SpecificDate {
                date: "11/26/2024".parse().unwrap(),
                intervals: vec![Interval::new(600, 720)],
                note: None,
            },
        ];
        assert_eq!(
            resolve_day(&facts, date(2024, 11, 26)).intervals(),
            vec![Interval::new(600, 720)]
        );
    }

    #[test]
    fn nth_and_last_weekday_matching() {
        // March 2024: Fridays on 1, 8, 15, 22, 29.
        assert!(week_matches(WeekOfMonth::First, date(2024, 3, 1)));
        assert!(week_matches(WeekOfMonth::Third, date(2024, 3, 15)));
        assert!(week_matches(WeekOfMonth::Fifth, date(2024, 3, 29)));
        assert!(week_matches(WeekOfMonth::Last, date(2024, 3, 29)));
        assert!(!week_matches(WeekOfMonth::Last, date(2024, 3, 22)));
        assert!(week_matches(WeekOfMonth::Last, date(2024, 2, 23)));
    }

    #[test]
    fn recurring_facts_are_additive() {
        let facts = vec![
            weekly(DayOfWeek::Friday),
            ScheduleFact::NthWeekdayOfMonth {
                week_of_month: WeekOfMonth::First,
                day_of_week: DayOfWeek::Friday,
                intervals: vec![Interval::new(1080, 1200)],
                note: None,
            },
        ];
        match resolve_day(&facts, date(2024, 3, 1)) {
            DayResolution::Recurring(applied) => assert_eq!(applied.len(), 2),
            other => panic!("unexpected resolution {other:?}"),
        }
        assert_eq!(
            resolve_day(&facts, date(2024, 3, 2)),
            DayResolution::Unscheduled
        );
    }
}
