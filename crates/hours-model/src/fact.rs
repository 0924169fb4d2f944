//! The canonical schedule fact.
//!
//! `ScheduleFact` is a closed sum type with one variant per recurrence kind.
//! Each variant carries only the fields its kind needs, so a day-of-month fact
//! cannot also name a weekday.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{CalendarDate, DayOfWeek, Interval, WeekOfMonth};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduleFact {
    /// Open every week on `day_of_week`.
    Weekly {
        day_of_week: DayOfWeek,
        intervals: Vec<Interval>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    },
    /// Open on the nth (or last) `day_of_week` of every month.
    NthWeekdayOfMonth {
        week_of_month: WeekOfMonth,
        day_of_week: DayOfWeek,
        intervals: Vec<Interval>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    },
    /// Open on a fixed day number of every month.
    DayOfMonth {
        day_of_month: u8,
        intervals: Vec<Interval>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    },
    /// Open on one calendar date.
    SpecificDate {
        date: CalendarDate,
        intervals: Vec<Interval>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    },
    /// Closed on one calendar date, overriding every other fact for that date.
    SpecificDateClosure {
        date: CalendarDate,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
}

/// Identity of a fact for duplicate detection: two facts with the same key
/// describe the same day and must not both appear in one program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FactKey {
    Weekly(DayOfWeek),
    NthWeekdayOfMonth(WeekOfMonth, DayOfWeek),
    DayOfMonth(u8),
    SpecificDate(CalendarDate),
    SpecificDateClosure(CalendarDate),
}

impl fmt::Display for FactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactKey::Weekly(day) => write!(f, "weekly {day}"),
            FactKey::NthWeekdayOfMonth(week, day) => write!(f, "{} {day}", week.ordinal()),
            FactKey::DayOfMonth(day) => write!(f, "day {day} of month"),
            FactKey::SpecificDate(date) => write!(f, "date {date}"),
            FactKey::SpecificDateClosure(date) => write!(f, "closure {date}"),
        }
    }
}

impl ScheduleFact {
    pub fn key(&self) -> FactKey {
        match self {
            ScheduleFact::Weekly { day_of_week, .. } => FactKey::Weekly(*day_of_week),
            ScheduleFact::NthWeekdayOfMonth {
                week_of_month,
                day_of_week,
                ..
            } => FactKey::NthWeekdayOfMonth(*week_of_month, *day_of_week),
            ScheduleFact::DayOfMonth { day_of_month, .. } => FactKey::DayOfMonth(*day_of_month),
            ScheduleFact::SpecificDate { date, .. } => FactKey::SpecificDate(*date),
            ScheduleFact::SpecificDateClosure { date, .. } => FactKey::SpecificDateClosure(*date),
        }
    }

    /// Open intervals; empty for closures.
    pub fn intervals(&self) -> &[Interval] {
        match self {
            ScheduleFact::Weekly { intervals, .. }
            | ScheduleFact::NthWeekdayOfMonth { intervals, .. }
            | ScheduleFact::DayOfMonth { intervals, .. }
            | ScheduleFact::SpecificDate { intervals, .. } => intervals,
            ScheduleFact::SpecificDateClosure { .. } => &[],
        }
    }

    pub fn note(&self) -> Option<&str> {
        match self {
            ScheduleFact::Weekly { note, .. }
            | ScheduleFact::NthWeekdayOfMonth { note, .. }
            | ScheduleFact::DayOfMonth { note, .. }
            | ScheduleFact::SpecificDate { note, .. } => note.as_deref(),
            ScheduleFact::SpecificDateClosure { .. } => None,
        }
    }

    /// The calendar date for date-bound kinds.
    pub fn date(&self) -> Option<CalendarDate> {
        match self {
            ScheduleFact::SpecificDate { date, .. }
            | ScheduleFact::SpecificDateClosure { date, .. } => Some(*date),
            _ => None,
        }
    }

    pub fn day_of_week(&self) -> Option<DayOfWeek> {
        match self {
            ScheduleFact::Weekly { day_of_week, .. }
            | ScheduleFact::NthWeekdayOfMonth { day_of_week, .. } => Some(*day_of_week),
            _ => None,
        }
    }

    pub fn is_closure(&self) -> bool {
        matches!(self, ScheduleFact::SpecificDateClosure { .. })
    }
}

impl fmt::Display for ScheduleFact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleFact::SpecificDateClosure { date, reason } => {
                write!(f, "closed {date}")?;
                if let Some(reason) = reason {
                    write!(f, " ({reason})")?;
                }
                Ok(())
            }
            _ => {
                match self.key() {
                    FactKey::Weekly(day) => write!(f, "{day}")?,
                    key => write!(f, "{key}")?,
                }
                for interval in self.intervals() {
                    write!(f, " {interval}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_kind_tag() {
        let fact = ScheduleFact::Weekly {
            day_of_week: DayOfWeek::Monday,
            intervals: vec![Interval::new(540, 1020)],
            note: None,
        };
        let json = serde_json::to_value(&fact).expect("serialize fact");
        assert_eq!(json["kind"], "weekly");
        assert_eq!(json["day_of_week"], "Monday");
        assert!(json.get("note").is_none());
        let round: ScheduleFact = serde_json::from_value(json).expect("deserialize fact");
        assert_eq!(round, fact);
    }

    #[test]
    fn closure_has_no_intervals() {
        let closure = ScheduleFact::SpecificDateClosure {
            date: "12/25".parse().unwrap(),
            reason: Some("Christmas".to_string()),
        };
        assert!(closure.intervals().is_empty());
        assert!(closure.is_closure());
        assert_eq!(closure.to_string(), "closed 12/25 (Christmas)");
    }

    #[test]
    fn display_describes_recurrence() {
        let fact = ScheduleFact::NthWeekdayOfMonth {
            week_of_month: WeekOfMonth::Third,
            day_of_week: DayOfWeek::Saturday,
            intervals: vec![Interval::new(600, 840)],
            note: None,
        };
        assert_eq!(fact.to_string(), "3rd Saturday 10:00-14:00");
    }
}
