//! Output column set derived from the input header row.

use hours_model::HoursColumn;
use hours_model::columns::PROGRAM_ID_COLUMN;

/// Where a column's value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSource {
    ProgramId,
    Hours(HoursColumn),
    /// Copied verbatim from the input row, keyed by the input header.
    PassThrough(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputColumn {
    pub header: String,
    pub source: ColumnSource,
}

/// Ordered output columns.
///
/// Input column order is preserved. The uncleaned hours column is dropped
/// unless kept as provenance, and any hours column the input lacks
/// (usually `Hours Closed 1` and `Hours Closed 3`) is appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    columns: Vec<OutputColumn>,
}

impl OutputLayout {
    pub fn from_input(headers: &[String], uncleaned_column: &str, keep_uncleaned: bool) -> Self {
        let mut columns = Vec::with_capacity(headers.len() + 2);
        let mut seen_hours = Vec::new();
        for header in headers {
            let trimmed = header.trim();
            let source = if trimmed.eq_ignore_ascii_case(PROGRAM_ID_COLUMN) {
                ColumnSource::ProgramId
            } else if let Some(column) = HoursColumn::from_header(trimmed) {
                seen_hours.push(column);
                ColumnSource::Hours(column)
            } else if trimmed.eq_ignore_ascii_case(uncleaned_column.trim()) && !keep_uncleaned {
                continue;
            } else {
                ColumnSource::PassThrough(header.clone())
            };
            columns.push(OutputColumn {
                header: header.clone(),
                source,
            });
        }
        for column in HoursColumn::ALL {
            if !seen_hours.contains(&column) {
                columns.push(OutputColumn {
                    header: column.header().to_string(),
                    source: ColumnSource::Hours(column),
                });
            }
        }
        Self { columns }
    }

    /// The canonical layout: program id followed by every hours column.
    pub fn canonical() -> Self {
        Self::from_input(&[PROGRAM_ID_COLUMN.to_string()], "", false)
    }

    pub fn columns(&self) -> &[OutputColumn] {
        &self.columns
    }

    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|column| column.header.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn keeps_input_order_and_appends_missing_closed_columns() {
        let layout = OutputLayout::from_input(
            &headers(&[
                "Program External ID",
                "Program Name",
                "Hours Uncleaned",
                "Hours Day of Week",
                "Hours Open 1",
                "Hours Open 2",
                "Hours Closed 2",
                "Hours Open 3",
                "Hours Note",
                "Hours Week of Month",
                "Hours Day of Month",
                "Hours Specific Date",
                "Hours Specific Date Closed Indicator",
                "Hours Specific Date Reason",
            ]),
            "Hours Uncleaned",
            false,
        );
        let headers = layout.headers();
        assert_eq!(headers[0], "Program External ID");
        assert_eq!(headers[1], "Program Name");
        assert_eq!(headers[2], "Hours Day of Week");
        assert!(!headers.contains(&"Hours Uncleaned"));
        assert_eq!(&headers[headers.len() - 2..], ["Hours Closed 1", "Hours Closed 3"]);
    }

    #[test]
    fn uncleaned_column_kept_on_request() {
        let layout = OutputLayout::from_input(
            &headers(&["Program External ID", "hours uncleaned"]),
            "Hours Uncleaned",
            true,
        );
        assert_eq!(
            layout.columns()[1].source,
            ColumnSource::PassThrough("hours uncleaned".to_string())
        );
    }

    #[test]
    fn canonical_layout_has_every_hours_column() {
        let layout = OutputLayout::canonical();
        assert_eq!(layout.columns().len(), 1 + HoursColumn::ALL.len());
        assert_eq!(layout.columns()[0].source, ColumnSource::ProgramId);
    }
}
