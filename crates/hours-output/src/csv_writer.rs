//! CSV rendering of output rows.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use hours_model::{HoursColumn, OutputRow};
use tracing::info;

use crate::ensure_parent_dir;
use crate::layout::{ColumnSource, OutputLayout};
use crate::time_format::{TimeFormat, render_time};

/// Render one row as field strings in layout order.
pub fn render_record(layout: &OutputLayout, row: &OutputRow, format: TimeFormat) -> Vec<String> {
    layout
        .columns()
        .iter()
        .map(|column| match &column.source {
            ColumnSource::ProgramId => row.program_id.clone(),
            ColumnSource::Hours(hours) => render_hours(*hours, row, format),
            ColumnSource::PassThrough(header) => {
                row.pass_through.get(header).cloned().unwrap_or_default()
            }
        })
        .collect()
}

fn render_hours(column: HoursColumn, row: &OutputRow, format: TimeFormat) -> String {
    let open = |slot: usize| {
        row.intervals[slot]
            .map(|interval| render_time(interval.open, format))
            .unwrap_or_default()
    };
    let close = |slot: usize| {
        row.intervals[slot]
            .map(|interval| render_time(interval.close, format))
            .unwrap_or_default()
    };
    match column {
        HoursColumn::DayOfWeek => row.day_of_week.map(|day| day.to_string()).unwrap_or_default(),
        HoursColumn::Open1 => open(0),
        HoursColumn::Closed1 => close(0),
        HoursColumn::Open2 => open(1),
        HoursColumn::Closed2 => close(1),
        HoursColumn::Open3 => open(2),
        HoursColumn::Closed3 => close(2),
        HoursColumn::Note => row.note.clone().unwrap_or_default(),
        HoursColumn::WeekOfMonth => row
            .week_of_month
            .map(|week| week.to_string())
            .unwrap_or_default(),
        HoursColumn::DayOfMonth => row
            .day_of_month
            .map(|day| day.to_string())
            .unwrap_or_default(),
        HoursColumn::SpecificDate => row
            .specific_date
            .map(|date| date.to_string())
            .unwrap_or_default(),
        HoursColumn::SpecificDateClosedIndicator => {
            if row.specific_date_closed {
                "Y".to_string()
            } else {
                String::new()
            }
        }
        HoursColumn::SpecificDateReason => row.specific_date_reason.clone().unwrap_or_default(),
    }
}

/// Write a header record and every row to `writer`.
pub fn write_rows<W: Write>(
    writer: W,
    layout: &OutputLayout,
    rows: &[OutputRow],
    format: TimeFormat,
) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(layout.headers())
        .context("write header record")?;
    for row in rows {
        csv_writer
            .write_record(render_record(layout, row, format))
            .with_context(|| format!("write row for program {}", row.program_id))?;
    }
    csv_writer.flush().context("flush output rows")?;
    Ok(())
}

pub fn write_rows_csv(
    path: &Path,
    layout: &OutputLayout,
    rows: &[OutputRow],
    format: TimeFormat,
) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_rows(BufWriter::new(file), layout, rows, format)?;
    info!(path = %path.display(), rows = rows.len(), "wrote cleansed hours");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use hours_model::{CalendarDate, DayOfWeek, Interval, ScheduleFact};

    use super::*;
    use crate::expand::expand;

    fn render(rows: &[OutputRow], layout: &OutputLayout, format: TimeFormat) -> String {
        let mut buffer = Vec::new();
        write_rows(&mut buffer, layout, rows, format).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    fn sample_rows() -> Vec<OutputRow> {
        let facts = vec![
            ScheduleFact::Weekly {
                day_of_week: DayOfWeek::Monday,
                intervals: vec![Interval::new(540, 1020)],
                note: None,
            },
            ScheduleFact::SpecificDateClosure {
                date: CalendarDate::new(None, 12, 25).unwrap(),
                reason: Some("Christmas, observed".to_string()),
            },
        ];
        expand("P1", &facts, &BTreeMap::new())
    }

    #[test]
    fn canonical_twelve_hour_output() {
        let output = render(&sample_rows(), &OutputLayout::canonical(), TimeFormat::TwelveHour);
        insta::assert_snapshot!(output, @r#"
        Program External ID,Hours Day of Week,Hours Open 1,Hours Closed 1,Hours Open 2,Hours Closed 2,Hours Open 3,Hours Closed 3,Hours Note,Hours Week of Month,Hours Day of Month,Hours Specific Date,Hours Specific Date Closed Indicator,Hours Specific Date Reason
        P1,Monday,9:00 AM,5:00 PM,,,,,,,,,,
        P1,,,,,,,,,,,12/25,Y,"Christmas, observed"
        "#);
    }

    #[test]
    fn twenty_four_hour_times() {
        let rows = sample_rows();
        let record = render_record(&OutputLayout::canonical(), &rows[0], TimeFormat::TwentyFourHour);
        assert_eq!(&record[..4], ["P1", "Monday", "09:00", "17:00"]);
    }

    #[test]
    fn pass_through_values_follow_input_header() {
        let mut rows = sample_rows();
        rows[0]
            .pass_through
            .insert("Program Name".to_string(), "Eastside".to_string());
        let layout = OutputLayout::from_input(
            &["Program Name".to_string(), "Program External ID".to_string()],
            "Hours Uncleaned",
            false,
        );
        let record = render_record(&layout, &rows[0], TimeFormat::TwelveHour);
        assert_eq!(&record[..2], ["Eastside", "P1"]);
        assert_eq!(render_record(&layout, &rows[1], TimeFormat::TwelveHour)[0], "");
    }
}
