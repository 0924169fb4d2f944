//! Time token parsing and interval resolution.
//!
//! A token is read into a `TimeToken` that remembers how explicit it was.
//! Explicit tokens (meridiem or 24-hour) map straight to a minute of day;
//! bare hours ("9", "5:30") are placed relative to the other end of the pair.

use hours_model::{Interval, MINUTES_PER_DAY};

const NOON: u16 = 720;

/// Which half of the day a 12-hour token names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    fn other(self) -> Self {
        match self {
            Meridiem::Am => Meridiem::Pm,
            Meridiem::Pm => Meridiem::Am,
        }
    }
}

/// How a time token expressed its half of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    Meridiem(Meridiem),
    /// 24-hour notation, a leading zero, or an hour above 12.
    TwentyFour,
    /// An hour of 1..=12 with no meridiem.
    Bare,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeToken {
    pub hour: u8,
    pub minute: u8,
    pub clock: Clock,
}

impl TimeToken {
    /// Minute of day when the token is unambiguous.
    pub fn explicit_minutes(&self) -> Option<u16> {
        match self.clock {
            Clock::Meridiem(meridiem) => Some(self.with_meridiem(meridiem)),
            Clock::TwentyFour => Some(u16::from(self.hour) * 60 + u16::from(self.minute)),
            Clock::Bare => None,
        }
    }

    fn with_meridiem(&self, meridiem: Meridiem) -> u16 {
        let base = u16::from(self.hour % 12) * 60 + u16::from(self.minute);
        match meridiem {
            Meridiem::Am => base,
            Meridiem::Pm => base + NOON,
        }
    }

    fn meridiem(&self) -> Option<Meridiem> {
        match self.clock {
            Clock::Meridiem(meridiem) => Some(meridiem),
            _ => None,
        }
    }
}

/// Parse one time token. Returns `None` for anything that is not a time.
pub fn parse_time_token(token: &str) -> Option<TimeToken> {
    let compact: String = token
        .trim()
        .to_ascii_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .collect();
    if compact.is_empty() {
        return None;
    }

    match compact.as_str() {
        "noon" | "12noon" | "midday" => {
            return Some(TimeToken {
                hour: 12,
                minute: 0,
                clock: Clock::Meridiem(Meridiem::Pm),
            });
        }
        "midnight" | "12midnight" => {
            return Some(TimeToken {
                hour: 0,
                minute: 0,
                clock: Clock::TwentyFour,
            });
        }
        _ => {}
    }

    let (body, meridiem) = split_meridiem(&compact);
    if let Some(hour) = hour_word(body) {
        return build(hour, 0, meridiem, false);
    }

    let mut parts = body.split(':');
    let head = parts.next()?;
    let minute_part = parts.next();
    let second_part = parts.next();
    if parts.next().is_some() || head.is_empty() || !head.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let (hour, minute, padded) = match minute_part {
        Some(minutes) => {
            if minutes.len() != 2 || !minutes.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            if let Some(seconds) = second_part {
                let valid = seconds.len() == 2
                    && seconds.parse::<u8>().is_ok_and(|value| value < 60);
                if !valid {
                    return None;
                }
            }
            (
                head.parse::<u8>().ok()?,
                minutes.parse::<u8>().ok()?,
                head.len() == 2 && head.starts_with('0'),
            )
        }
        None => match head.len() {
            1 | 2 => (head.parse::<u8>().ok()?, 0, head.len() == 2 && head.starts_with('0')),
            3 => (head[..1].parse::<u8>().ok()?, head[1..].parse::<u8>().ok()?, false),
            4 => (head[..2].parse::<u8>().ok()?, head[2..].parse::<u8>().ok()?, true),
            _ => return None,
        },
    };
    build(hour, minute, meridiem, padded)
}

fn build(hour: u8, minute: u8, meridiem: Option<Meridiem>, padded: bool) -> Option<TimeToken> {
    if minute >= 60 {
        return None;
    }
    let clock = match meridiem {
        Some(meridiem) => {
            if !(1..=12).contains(&hour) {
                return None;
            }
            Clock::Meridiem(meridiem)
        }
        None if hour == 24 => {
            if minute != 0 {
                return None;
            }
            // 24:00 is the end of day; keep it as midnight.
            return Some(TimeToken {
                hour: 0,
                minute: 0,
                clock: Clock::TwentyFour,
            });
        }
        None if hour > 24 => return None,
        None if padded || hour == 0 || hour > 12 => Clock::TwentyFour,
        None => Clock::Bare,
    };
    Some(TimeToken {
        hour,
        minute,
        clock,
    })
}

fn split_meridiem(compact: &str) -> (&str, Option<Meridiem>) {
    for (suffix, meridiem) in [
        ("am", Meridiem::Am),
        ("pm", Meridiem::Pm),
        ("a", Meridiem::Am),
        ("p", Meridiem::Pm),
    ] {
        if let Some(body) = compact.strip_suffix(suffix)
            && (body.ends_with(|c: char| c.is_ascii_digit()) || hour_word(body).is_some())
        {
            return (body, Some(meridiem));
        }
    }
    (compact, None)
}

fn hour_word(word: &str) -> Option<u8> {
    let hour = match word {
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        _ => return None,
    };
    Some(hour)
}

/// Resolve an open/close token pair into an interval.
///
/// Any pair whose close is not after the open is overnight, whichever side
/// carried the meridiem. An explicit close at midnight is the end of the day.
pub fn resolve_interval(open: TimeToken, close: TimeToken) -> Interval {
    let (open_minutes, close_minutes) = match (open.explicit_minutes(), close.explicit_minutes()) {
        (Some(open), Some(close)) => (open, end_of_day(close)),
        (None, Some(close_minutes)) => {
            let close_minutes = end_of_day(close_minutes);
            (
                bare_open_before(open, close.meridiem(), close_minutes),
                close_minutes,
            )
        }
        (Some(open_minutes), None) => (open_minutes, bare_close_after(close, open_minutes)),
        (None, None) => {
            let open_minutes = bare_open_default(open);
            (open_minutes, bare_close_after(close, open_minutes))
        }
    };
    if close_minutes > open_minutes {
        Interval::new(open_minutes, close_minutes)
    } else {
        Interval::overnight(open_minutes, close_minutes)
    }
}

fn end_of_day(minutes: u16) -> u16 {
    if minutes == 0 { MINUTES_PER_DAY } else { minutes }
}

/// Take the close's meridiem when that keeps the open first, else the other.
fn bare_open_before(open: TimeToken, close_meridiem: Option<Meridiem>, close: u16) -> u16 {
    match close_meridiem {
        Some(meridiem) => {
            let same = open.with_meridiem(meridiem);
            if same < close {
                same
            } else {
                open.with_meridiem(meridiem.other())
            }
        }
        None => {
            let default = bare_open_default(open);
            let morning = open.with_meridiem(Meridiem::Am);
            if default < close || morning >= close {
                default
            } else {
                morning
            }
        }
    }
}

/// Opening hours from 7 to 11 read as morning, 12 as noon, 1 to 6 as afternoon.
fn bare_open_default(open: TimeToken) -> u16 {
    match open.hour {
        12 => NOON + u16::from(open.minute),
        1..=6 => open.with_meridiem(Meridiem::Pm),
        _ => open.with_meridiem(Meridiem::Am),
    }
}

/// The first reading of a bare close that falls after the open.
fn bare_close_after(close: TimeToken, open: u16) -> u16 {
    let candidates: [Option<u16>; 2] = if close.hour == 12 {
        let midnight = (close.minute == 0).then_some(MINUTES_PER_DAY);
        [Some(NOON + u16::from(close.minute)), midnight]
    } else {
        [
            Some(close.with_meridiem(Meridiem::Am)),
            Some(close.with_meridiem(Meridiem::Pm)),
        ]
    };
    candidates
        .into_iter()
        .flatten()
        .find(|candidate| *candidate > open)
        .unwrap_or_else(|| close.with_meridiem(Meridiem::Am))
}
