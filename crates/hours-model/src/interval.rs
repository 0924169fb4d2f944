use serde::{Deserialize, Serialize};
use std::fmt;

/// Minutes in a day. A close of `MINUTES_PER_DAY` means "until midnight".
pub const MINUTES_PER_DAY: u16 = 1440;

/// Maximum open/close pairs per day (split shifts, lunch closures).
pub const MAX_INTERVALS: usize = 3;

/// One open/close pair in minutes of day.
///
/// `open < close` holds for same-day intervals. An interval that runs past
/// midnight (`10pm-2am`) keeps `close <= open` and sets `overnight`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub open: u16,
    pub close: u16,
    #[serde(default)]
    pub overnight: bool,
}

impl Interval {
    pub fn new(open: u16, close: u16) -> Self {
        Self {
            open,
            close,
            overnight: false,
        }
    }

    pub fn overnight(open: u16, close: u16) -> Self {
        Self {
            open,
            close,
            overnight: true,
        }
    }

    /// True when both ends are within the day and the pair is ordered (or
    /// explicitly overnight).
    pub fn is_well_formed(&self) -> bool {
        if self.open >= MINUTES_PER_DAY || self.close > MINUTES_PER_DAY {
            return false;
        }
        self.overnight || self.open < self.close
    }

    /// End of the interval on its opening day; overnight intervals run to midnight.
    pub fn end_of_day(&self) -> u16 {
        if self.overnight {
            MINUTES_PER_DAY
        } else {
            self.close
        }
    }

    /// True when the two intervals share any minute on the opening day.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.open < other.end_of_day() && other.open < self.end_of_day()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}-{:02}:{:02}",
            self.open / 60,
            self.open % 60,
            self.close / 60,
            self.close % 60
        )?;
        if self.overnight {
            f.write_str(" (overnight)")?;
        }
        Ok(())
    }
}
