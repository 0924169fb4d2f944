//! Anchor recognition: which day(s) or date(s) an entry's hours apply to.
//!
//! Recognition runs from most to least specific. Any date in the text makes
//! the anchor a date anchor; otherwise the text is tokenized into weekday,
//! ordinal, number and connective tokens and classified.

use std::str::FromStr;
use std::sync::LazyLock;

use hours_model::{CalendarDate, DayOfWeek, WeekOfMonth};
use regex::Regex;

/// `12/25`, `12/25/2024`, `12/25/24`, `12-25-2024`.
static NUMERIC_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,2})(?:/(\d{1,2})(?:/(\d{4}|\d{2}))?|-(\d{1,2})-(\d{4}|\d{2}))\b")
        .expect("Invalid numeric date regex")
});

/// `2024-12-25`.
static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b").expect("Invalid ISO date regex")
});

const MONTHS: &str = "january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec";

/// `Dec 25`, `December 25th, 2024`.
static MONTH_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b({MONTHS})\.?\s+(\d{{1,2}})(?:st|nd|rd|th)?\b(?:,?\s+(\d{{4}})\b)?"
    ))
    .expect("Invalid month-day regex")
});

/// `25 Dec`, `25th of December 2024`.
static DAY_MONTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b(\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?({MONTHS})\b\.?(?:,?\s+(\d{{4}})\b)?"
    ))
    .expect("Invalid day-month regex")
});

static WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-z]+|\d+(?:st|nd|rd|th)?|[-/,&+]").expect("Invalid anchor token regex")
});

static CLOSED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bclosed?\b").expect("Invalid closure regex"));

/// A recognized anchor. Lists expand to one fact per element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor {
    Dates(Vec<CalendarDate>),
    DaysOfMonth(Vec<u8>),
    NthWeekdays(Vec<(WeekOfMonth, DayOfWeek)>),
    Weekdays(Vec<DayOfWeek>),
}

impl Anchor {
    pub fn is_date(&self) -> bool {
        matches!(self, Anchor::Dates(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorError {
    /// Nothing but whitespace.
    Empty,
    /// Text that names no day or date.
    Unrecognized,
    /// A date-shaped token that is not a real date (2/30).
    InvalidDate,
}

/// True when the anchor text itself says "closed".
pub fn mentions_closure(text: &str) -> bool {
    CLOSED.is_match(text)
}

pub fn parse_anchor(text: &str) -> Result<Anchor, AnchorError> {
    let lowered = text.trim().to_lowercase().replace(['\u{2013}', '\u{2014}'], "-");
    if lowered.is_empty() {
        return Err(AnchorError::Empty);
    }
    if let Some(dates) = find_dates(&lowered)? {
        return Ok(Anchor::Dates(dates));
    }
    classify(&tokenize(&lowered)?)
}

fn find_dates(text: &str) -> Result<Option<Vec<CalendarDate>>, AnchorError> {
    let mut found: Vec<(usize, Result<CalendarDate, AnchorError>)> = Vec::new();
    let mut claimed: Vec<(usize, usize)> = Vec::new();

    for captures in ISO_DATE.captures_iter(text) {
        let Some(whole) = captures.get(0) else { continue };
        let date = date_from(
            captures.get(1).map(|m| m.as_str()),
            captures.get(2).map(|m| m.as_str()),
            captures.get(3).map(|m| m.as_str()),
        );
        claimed.push((whole.start(), whole.end()));
        found.push((whole.start(), date));
    }
    for captures in NUMERIC_DATE.captures_iter(text) {
        let Some(whole) = captures.get(0) else { continue };
        if overlaps_claimed(&claimed, whole.start(), whole.end()) {
            continue;
        }
        let month = captures.get(1).map(|m| m.as_str());
        let date = match captures.get(2) {
            Some(day) => date_from(captures.get(3).map(|m| m.as_str()), month, Some(day.as_str())),
            None => date_from(
                captures.get(5).map(|m| m.as_str()),
                month,
                captures.get(4).map(|m| m.as_str()),
            ),
        };
        claimed.push((whole.start(), whole.end()));
        found.push((whole.start(), date));
    }
    for (regex, month_group, day_group) in [(&*MONTH_DAY, 1, 2), (&*DAY_MONTH, 2, 1)] {
        for captures in regex.captures_iter(text) {
            let Some(whole) = captures.get(0) else { continue };
            if overlaps_claimed(&claimed, whole.start(), whole.end()) {
                continue;
            }
            let month = captures
                .get(month_group)
                .and_then(|m| month_number(m.as_str()))
                .map(|n| n.to_string());
            let date = date_from(
                captures.get(3).map(|m| m.as_str()),
                month.as_deref(),
                captures.get(day_group).map(|m| m.as_str()),
            );
            claimed.push((whole.start(), whole.end()));
            found.push((whole.start(), date));
        }
    }

    if found.is_empty() {
        return Ok(None);
    }
    found.sort_by_key(|(start, _)| *start);
    found
        .into_iter()
        .map(|(_, date)| date)
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn overlaps_claimed(claimed: &[(usize, usize)], start: usize, end: usize) -> bool {
    claimed.iter().any(|(s, e)| start < *e && *s < end)
}

fn date_from(
    year: Option<&str>,
    month: Option<&str>,
    day: Option<&str>,
) -> Result<CalendarDate, AnchorError> {
    let number = |part: Option<&str>| part.and_then(|p| p.parse::<u32>().ok());
    let (Some(month), Some(day)) = (number(month), number(day)) else {
        return Err(AnchorError::InvalidDate);
    };
    let year = match year {
        Some(text) => {
            let value = text.parse::<i32>().map_err(|_| AnchorError::InvalidDate)?;
            Some(if text.len() == 2 { 2000 + value } else { value })
        }
        None => None,
    };
    CalendarDate::new(year, month, day).map_err(|_| AnchorError::InvalidDate)
}

fn month_number(name: &str) -> Option<u32> {
    let prefix = name.get(..3)?;
    let number = match prefix {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(number)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Day(DayOfWeek),
    Days(Vec<DayOfWeek>),
    Ordinal(u32),
    Last,
    Number(u32),
    Range,
    Except,
    Separator,
}

const FILLER: &[&str] = &[
    "a", "all", "also", "are", "at", "closed", "close", "day", "days", "each", "every", "from",
    "hours", "in", "is", "month", "monthly", "months", "of", "on", "only", "open", "opens", "per",
    "the", "week", "weekly", "weeks",
];

fn tokenize(text: &str) -> Result<Vec<Token>, AnchorError> {
    let words: Vec<&str> = WORD.find_iter(text).map(|m| m.as_str()).collect();
    let mut tokens = Vec::with_capacity(words.len());
    for (index, word) in words.iter().enumerate() {
        let token = match *word {
            "-" | "through" | "thru" | "to" | "till" | "til" | "until" => Token::Range,
            "/" | "," | "&" | "+" | "and" | "or" => Token::Separator,
            "except" | "but" | "not" => Token::Except,
            "weekday" | "weekdays" => Token::Days(DayOfWeek::Monday.range_to(DayOfWeek::Friday)),
            "weekend" | "weekends" => Token::Days(vec![DayOfWeek::Saturday, DayOfWeek::Sunday]),
            "daily" | "everyday" => Token::Days(DayOfWeek::ALL.to_vec()),
            "day" | "days" if index > 0 && words[index - 1] == "every" => {
                Token::Days(DayOfWeek::ALL.to_vec())
            }
            "first" => Token::Ordinal(1),
            "second" => Token::Ordinal(2),
            "third" => Token::Ordinal(3),
            "fourth" => Token::Ordinal(4),
            "fifth" => Token::Ordinal(5),
            "last" | "final" => Token::Last,
            word if FILLER.contains(&word) => continue,
            word if word.starts_with(|c: char| c.is_ascii_digit()) => {
                let digits: String = word.chars().take_while(char::is_ascii_digit).collect();
                let value = digits.parse::<u32>().map_err(|_| AnchorError::Unrecognized)?;
                if digits.len() == word.len() {
                    Token::Number(value)
                } else {
                    Token::Ordinal(value)
                }
            }
            word => match DayOfWeek::from_str(word) {
                Ok(day) => Token::Day(day),
                Err(_) => return Err(AnchorError::Unrecognized),
            },
        };
        tokens.push(token);
    }
    Ok(tokens)
}

fn classify(tokens: &[Token]) -> Result<Anchor, AnchorError> {
    let mut days: Vec<DayOfWeek> = Vec::new();
    let mut excluded: Vec<DayOfWeek> = Vec::new();
    let mut ordinals: Vec<u32> = Vec::new();
    let mut numbers: Vec<u32> = Vec::new();
    let mut last = false;
    let mut range_pending = false;
    let mut excluding = false;

    for token in tokens {
        match token {
            Token::Range => {
                range_pending = true;
                continue;
            }
            Token::Separator => {}
            Token::Except => excluding = true,
            Token::Day(day) => {
                let target = if excluding { &mut excluded } else { &mut days };
                match target.last().copied() {
                    Some(start) if range_pending => {
                        target.extend(start.range_to(*day).into_iter().skip(1));
                    }
                    _ => target.push(*day),
                }
            }
            Token::Days(group) => {
                let target = if excluding { &mut excluded } else { &mut days };
                target.extend(group.iter().copied());
            }
            Token::Ordinal(value) => match ordinals.last().copied() {
                Some(start) if range_pending && start < *value => {
                    ordinals.extend(start + 1..=*value);
                }
                _ => ordinals.push(*value),
            },
            Token::Number(value) => numbers.push(*value),
            Token::Last => last = true,
        }
        range_pending = false;
    }
    days.retain(|day| !excluded.contains(day));

    if !days.is_empty() {
        if ordinals.is_empty() && !last {
            return if numbers.is_empty() {
                Ok(Anchor::Weekdays(days))
            } else {
                Err(AnchorError::Unrecognized)
            };
        }
        if !numbers.is_empty() {
            return Err(AnchorError::Unrecognized);
        }
        let mut weeks = ordinals
            .iter()
            .map(|n| WeekOfMonth::from_number(*n).ok_or(AnchorError::Unrecognized))
            .collect::<Result<Vec<_>, _>>()?;
        if last {
            weeks.push(WeekOfMonth::Last);
        }
        let pairs = weeks
            .iter()
            .flat_map(|week| days.iter().map(move |day| (*week, *day)))
            .collect();
        return Ok(Anchor::NthWeekdays(pairs));
    }

    if last || (ordinals.is_empty() && numbers.is_empty()) {
        return Err(AnchorError::Unrecognized);
    }
    let mut month_days = Vec::with_capacity(ordinals.len() + numbers.len());
    for value in ordinals.iter().chain(numbers.iter()) {
        match u8::try_from(*value) {
            Ok(day) if (1..=31).contains(&day) => month_days.push(day),
            _ => return Err(AnchorError::Unrecognized),
        }
    }
    Ok(Anchor::DaysOfMonth(month_days))
}
