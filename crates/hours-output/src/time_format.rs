use std::fmt;
use std::str::FromStr;

use hours_model::MINUTES_PER_DAY;
use serde::{Deserialize, Serialize};

/// How open/close times are written to the output columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeFormat {
    /// `9:00 AM`
    #[default]
    #[serde(rename = "12h")]
    TwelveHour,
    /// `09:00`
    #[serde(rename = "24h")]
    TwentyFourHour,
}

impl TimeFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeFormat::TwelveHour => "12h",
            TimeFormat::TwentyFourHour => "24h",
        }
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "12h" | "12" => Ok(TimeFormat::TwelveHour),
            "24h" | "24" => Ok(TimeFormat::TwentyFourHour),
            other => Err(format!("unknown time format '{other}' (expected 12h or 24h)")),
        }
    }
}

/// Render a minute of day. 1440 is end of day: `12:00 AM` or `24:00`.
pub fn render_time(minutes: u16, format: TimeFormat) -> String {
    let hour = minutes / 60;
    let minute = minutes % 60;
    match format {
        TimeFormat::TwentyFourHour => format!("{hour:02}:{minute:02}"),
        TimeFormat::TwelveHour => {
            let hour = hour % 24;
            let meridiem = if hour < 12 || minutes == MINUTES_PER_DAY {
                "AM"
            } else {
                "PM"
            };
            let display_hour = match hour % 12 {
                0 => 12,
                other => other,
            };
            format!("{display_hour}:{minute:02} {meridiem}")
        }
    }
}
