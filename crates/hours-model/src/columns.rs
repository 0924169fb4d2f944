//! Column names of the bulk upload hours schema.

use std::fmt;

/// Unique program identifier column.
pub const PROGRAM_ID_COLUMN: &str = "Program External ID";

/// Default name of the caller-supplied plaintext column.
pub const UNCLEANED_COLUMN: &str = "Hours Uncleaned";

/// Hours columns rewritten by the cleanser. Every other column passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HoursColumn {
    DayOfWeek,
    Open1,
    Closed1,
    Open2,
    Closed2,
    Open3,
    Closed3,
    Note,
    WeekOfMonth,
    DayOfMonth,
    SpecificDate,
    SpecificDateClosedIndicator,
    SpecificDateReason,
}

impl HoursColumn {
    /// Canonical output order.
    pub const ALL: [HoursColumn; 13] = [
        HoursColumn::DayOfWeek,
        HoursColumn::Open1,
        HoursColumn::Closed1,
        HoursColumn::Open2,
        HoursColumn::Closed2,
        HoursColumn::Open3,
        HoursColumn::Closed3,
        HoursColumn::Note,
        HoursColumn::WeekOfMonth,
        HoursColumn::DayOfMonth,
        HoursColumn::SpecificDate,
        HoursColumn::SpecificDateClosedIndicator,
        HoursColumn::SpecificDateReason,
    ];

    /// Columns the input table must carry. `Hours Closed 1` and `Hours Closed 3`
    /// are not required on input but are always written.
    pub const REQUIRED: [HoursColumn; 11] = [
        HoursColumn::DayOfWeek,
        HoursColumn::Open1,
        HoursColumn::Open2,
        HoursColumn::Closed2,
        HoursColumn::Open3,
        HoursColumn::Note,
        HoursColumn::WeekOfMonth,
        HoursColumn::DayOfMonth,
        HoursColumn::SpecificDate,
        HoursColumn::SpecificDateClosedIndicator,
        HoursColumn::SpecificDateReason,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            HoursColumn::DayOfWeek => "Hours Day of Week",
            HoursColumn::Open1 => "Hours Open 1",
            HoursColumn::Closed1 => "Hours Closed 1",
            HoursColumn::Open2 => "Hours Open 2",
            HoursColumn::Closed2 => "Hours Closed 2",
            HoursColumn::Open3 => "Hours Open 3",
            HoursColumn::Closed3 => "Hours Closed 3",
            HoursColumn::Note => "Hours Note",
            HoursColumn::WeekOfMonth => "Hours Week of Month",
            HoursColumn::DayOfMonth => "Hours Day of Month",
            HoursColumn::SpecificDate => "Hours Specific Date",
            HoursColumn::SpecificDateClosedIndicator => "Hours Specific Date Closed Indicator",
            HoursColumn::SpecificDateReason => "Hours Specific Date Reason",
        }
    }

    /// Match a header ignoring case and surrounding whitespace.
    pub fn from_header(header: &str) -> Option<Self> {
        let trimmed = header.trim();
        Self::ALL
            .into_iter()
            .find(|column| column.header().eq_ignore_ascii_case(trimmed))
    }
}

impl fmt::Display for HoursColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_is_case_insensitive() {
        assert_eq!(
            HoursColumn::from_header("  hours day of week "),
            Some(HoursColumn::DayOfWeek)
        );
        assert_eq!(
            HoursColumn::from_header("HOURS SPECIFIC DATE REASON"),
            Some(HoursColumn::SpecificDateReason)
        );
        assert_eq!(HoursColumn::from_header("Program Name"), None);
    }

    #[test]
    fn required_columns_are_canonical() {
        for column in HoursColumn::REQUIRED {
            assert!(HoursColumn::ALL.contains(&column));
        }
        assert!(!HoursColumn::REQUIRED.contains(&HoursColumn::Closed1));
    }
}
