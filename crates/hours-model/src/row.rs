use std::collections::BTreeMap;

use serde::Serialize;

use crate::{CalendarDate, DayOfWeek, Interval, MAX_INTERVALS, WeekOfMonth};

/// One materialized schedule occurrence for a program.
///
/// Rows are built once by the row expander and then only read. Rendering to
/// column strings happens at write time so the time format stays a writer
/// concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRow {
    pub program_id: String,
    pub day_of_week: Option<DayOfWeek>,
    pub week_of_month: Option<WeekOfMonth>,
    pub day_of_month: Option<u8>,
    pub specific_date: Option<CalendarDate>,
    pub specific_date_closed: bool,
    pub specific_date_reason: Option<String>,
    pub intervals: [Option<Interval>; MAX_INTERVALS],
    pub note: Option<String>,
    pub pass_through: BTreeMap<String, String>,
}

impl OutputRow {
    /// Populated interval slots in order.
    pub fn populated_intervals(&self) -> impl Iterator<Item = &Interval> {
        self.intervals.iter().flatten()
    }
}
