use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::ModelError;

/// A calendar date that may omit the year.
///
/// Hours text usually says "closed 12/25" without a year; a yearless date
/// matches that month/day in every year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: Option<i32>,
    month: u32,
    day: u32,
}

impl CalendarDate {
    /// Build a date, checking that it exists. A yearless Feb 29 is accepted.
    pub fn new(year: Option<i32>, month: u32, day: u32) -> Result<Self, ModelError> {
        // 2000 is a leap year, so every month/day that can exist passes.
        let check_year = year.unwrap_or(2000);
        if NaiveDate::from_ymd_opt(check_year, month, day).is_none() {
            return Err(ModelError::InvalidDate(match year {
                Some(year) => format!("{month:02}/{day:02}/{year:04}"),
                None => format!("{month:02}/{day:02}"),
            }));
        }
        Ok(Self { year, month, day })
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// True when this date names `date` (yearless dates match any year).
    pub fn matches(&self, date: NaiveDate) -> bool {
        self.month == date.month()
            && self.day == date.day()
            && self.year.is_none_or(|year| year == date.year())
    }

    /// True when both dates can name the same day.
    pub fn coincides_with(&self, other: &CalendarDate) -> bool {
        self.month == other.month
            && self.day == other.day
            && match (self.year, other.year) {
                (Some(a), Some(b)) => a == b,
                _ => true,
            }
    }
}

impl fmt::Display for CalendarDate {
    /// `MM/DD/YYYY`, or `MM/DD` when the year is unknown.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year {
            Some(year) => write!(f, "{:02}/{:02}/{:04}", self.month, self.day, year),
            None => write!(f, "{:02}/{:02}", self.month, self.day),
        }
    }
}

impl FromStr for CalendarDate {
    type Err = ModelError;

    /// Parse the canonical forms `MM/DD`, `MM/DD/YYYY` and `YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || ModelError::InvalidDate(trimmed.to_string());
        let parts: Vec<&str> = if trimmed.contains('/') {
            trimmed.split('/').collect()
        } else {
            trimmed.split('-').collect()
        };
        let numbers: Vec<u32> = parts
            .iter()
            .map(|part| part.trim().parse::<u32>())
            .collect::<Result<_, _>>()
            .map_err(|_| invalid())?;
        match (trimmed.contains('/'), numbers.as_slice()) {
            (true, [month, day]) => Self::new(None, *month, *day),
            (true, [month, day, year]) if parts[2].trim().len() == 4 => {
                Self::new(Some(*year as i32), *month, *day)
            }
            (false, [year, month, day]) if parts[0].trim().len() == 4 => {
                Self::new(Some(*year as i32), *month, *day)
            }
            _ => Err(invalid()),
        }
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
