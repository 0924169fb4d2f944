//! Type-safe enumerations for schedule recurrence.
//!
//! Weekday and ordinal names arrive as loose strings in hours text and in the
//! bulk upload columns; these enums give them one canonical spelling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Day of the week, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// All weekdays in calendar order starting Monday.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Returns the full English name as written to the `Hours Day of Week` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }

    /// Zero-based index, Monday = 0.
    pub fn index(&self) -> usize {
        match self {
            DayOfWeek::Monday => 0,
            DayOfWeek::Tuesday => 1,
            DayOfWeek::Wednesday => 2,
            DayOfWeek::Thursday => 3,
            DayOfWeek::Friday => 4,
            DayOfWeek::Saturday => 5,
            DayOfWeek::Sunday => 6,
        }
    }

    /// The following day, wrapping Sunday to Monday.
    pub fn succ(&self) -> DayOfWeek {
        Self::ALL[(self.index() + 1) % 7]
    }

    /// Days from `self` to `end` inclusive, wrapping through the week when
    /// `end` comes before `self` (Fri-Mon yields Fri, Sat, Sun, Mon).
    pub fn range_to(&self, end: DayOfWeek) -> Vec<DayOfWeek> {
        let mut days = vec![*self];
        let mut current = *self;
        while current != end {
            current = current.succ();
            days.push(current);
        }
        days
    }

    pub fn from_chrono(weekday: chrono::Weekday) -> Self {
        Self::ALL[weekday.num_days_from_monday() as usize]
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayOfWeek {
    type Err = String;

    /// Parse a weekday name or common abbreviation (case-insensitive).
    ///
    /// Plural forms ("Mondays") and trailing periods ("Tues.") are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().trim_end_matches('.').to_lowercase();
        if let Some(day) = lookup_weekday(&normalized) {
            return Ok(day);
        }
        if let Some(stripped) = normalized.strip_suffix('s')
            && let Some(day) = lookup_weekday(stripped)
        {
            return Ok(day);
        }
        Err(format!("Unknown day of week: {s}"))
    }
}

fn lookup_weekday(value: &str) -> Option<DayOfWeek> {
    let day = match value {
        "monday" | "mon" | "mo" | "m" => DayOfWeek::Monday,
        "tuesday" | "tue" | "tues" | "tu" => DayOfWeek::Tuesday,
        "wednesday" | "wed" | "weds" | "we" | "w" => DayOfWeek::Wednesday,
        "thursday" | "thu" | "thur" | "thurs" | "th" => DayOfWeek::Thursday,
        "friday" | "fri" | "fr" | "f" => DayOfWeek::Friday,
        "saturday" | "sat" | "sa" => DayOfWeek::Saturday,
        "sunday" | "sun" | "su" => DayOfWeek::Sunday,
        _ => return None,
    };
    Some(day)
}

/// Week-of-month ordinal for nth-weekday recurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WeekOfMonth {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Last,
}

impl WeekOfMonth {
    /// Ordinal from a 1-based week number (1..=5).
    pub fn from_number(number: u32) -> Option<Self> {
        match number {
            1 => Some(WeekOfMonth::First),
            2 => Some(WeekOfMonth::Second),
            3 => Some(WeekOfMonth::Third),
            4 => Some(WeekOfMonth::Fourth),
            5 => Some(WeekOfMonth::Fifth),
            _ => None,
        }
    }

    /// 1-based week number, `None` for `Last`.
    pub fn number(&self) -> Option<u32> {
        match self {
            WeekOfMonth::First => Some(1),
            WeekOfMonth::Second => Some(2),
            WeekOfMonth::Third => Some(3),
            WeekOfMonth::Fourth => Some(4),
            WeekOfMonth::Fifth => Some(5),
            WeekOfMonth::Last => None,
        }
    }

    /// Column value for `Hours Week of Month`.
    pub fn as_str(&self) -> &'static str {
        match self {
            WeekOfMonth::First => "1",
            WeekOfMonth::Second => "2",
            WeekOfMonth::Third => "3",
            WeekOfMonth::Fourth => "4",
            WeekOfMonth::Fifth => "5",
            WeekOfMonth::Last => "Last",
        }
    }

    /// English ordinal ("1st", "Last") used when describing a fact in text.
    pub fn ordinal(&self) -> &'static str {
        match self {
            WeekOfMonth::First => "1st",
            WeekOfMonth::Second => "2nd",
            WeekOfMonth::Third => "3rd",
            WeekOfMonth::Fourth => "4th",
            WeekOfMonth::Fifth => "5th",
            WeekOfMonth::Last => "Last",
        }
    }
}

impl fmt::Display for WeekOfMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeekOfMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let week = match normalized.as_str() {
            "1" | "1st" | "first" => WeekOfMonth::First,
            "2" | "2nd" | "second" => WeekOfMonth::Second,
            "3" | "3rd" | "third" => WeekOfMonth::Third,
            "4" | "4th" | "fourth" => WeekOfMonth::Fourth,
            "5" | "5th" | "fifth" => WeekOfMonth::Fifth,
            "last" => WeekOfMonth::Last,
            _ => return Err(format!("Unknown week of month: {s}")),
        };
        Ok(week)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_of_week_from_str() {
        assert_eq!("Mon".parse::<DayOfWeek>().unwrap(), DayOfWeek::Monday);
        assert_eq!("TUES.".parse::<DayOfWeek>().unwrap(), DayOfWeek::Tuesday);
        assert_eq!("thursdays".parse::<DayOfWeek>().unwrap(), DayOfWeek::Thursday);
        assert_eq!("Sa".parse::<DayOfWeek>().unwrap(), DayOfWeek::Saturday);
        assert!("holiday".parse::<DayOfWeek>().is_err());
    }

    #[test]
    fn test_day_range_wraps_through_week() {
        assert_eq!(
            DayOfWeek::Monday.range_to(DayOfWeek::Wednesday),
            vec![DayOfWeek::Monday, DayOfWeek::Tuesday, DayOfWeek::Wednesday]
        );
        assert_eq!(
            DayOfWeek::Friday.range_to(DayOfWeek::Monday),
            vec![
                DayOfWeek::Friday,
                DayOfWeek::Saturday,
                DayOfWeek::Sunday,
                DayOfWeek::Monday
            ]
        );
        assert_eq!(
            DayOfWeek::Sunday.range_to(DayOfWeek::Sunday),
            vec![DayOfWeek::Sunday]
        );
    }

    #[test]
    fn test_week_of_month_from_str() {
        assert_eq!("3rd".parse::<WeekOfMonth>().unwrap(), WeekOfMonth::Third);
        assert_eq!("Last".parse::<WeekOfMonth>().unwrap(), WeekOfMonth::Last);
        assert_eq!("5".parse::<WeekOfMonth>().unwrap(), WeekOfMonth::Fifth);
        assert!("6th".parse::<WeekOfMonth>().is_err());
    }

    #[test]
    fn test_from_chrono() {
        assert_eq!(DayOfWeek::from_chrono(chrono::Weekday::Mon), DayOfWeek::Monday);
        assert_eq!(DayOfWeek::from_chrono(chrono::Weekday::Sun), DayOfWeek::Sunday);
    }
}
