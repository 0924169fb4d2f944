use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use hours_model::InputSchemaError;
use tracing::debug;

use crate::error::{IngestError, Result};

/// A CSV file as header names plus string cells.
///
/// Every row is padded or cut to the header width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Position of a header, ignoring case and surrounding whitespace.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let wanted = normalize_header(name);
        self.headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(&wanted))
    }

    /// Reject headers that collide once case and whitespace are folded.
    pub fn check_unique_headers(&self) -> std::result::Result<(), InputSchemaError> {
        for (index, header) in self.headers.iter().enumerate() {
            if self.headers[..index]
                .iter()
                .any(|earlier| earlier.eq_ignore_ascii_case(header))
            {
                return Err(InputSchemaError::DuplicateColumn {
                    column: header.clone(),
                });
            }
        }
        Ok(())
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = std::fs::File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_csv_table_from_reader(file).map_err(|source| IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.rows.len(),
        "read csv table"
    );
    Ok(table)
}

/// Read a table whose first non-blank record is the header row.
pub fn read_csv_table_from_reader<R: Read>(reader: R) -> std::result::Result<CsvTable, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        match &headers {
            None => headers = Some(record.iter().map(normalize_header).collect()),
            Some(headers) => {
                let row = (0..headers.len())
                    .map(|idx| normalize_cell(record.get(idx).unwrap_or("")))
                    .collect();
                rows.push(row);
            }
        }
    }
    Ok(CsvTable {
        headers: headers.unwrap_or_default(),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_headers_and_cells() {
        let table =
            read_csv_table_from_reader("\u{feff}Program  External ID , Note\n P1 , x \n".as_bytes())
                .unwrap();
        assert_eq!(table.headers, vec!["Program External ID", "Note"]);
        assert_eq!(table.rows, vec![vec!["P1".to_string(), "x".to_string()]]);
    }

    #[test]
    fn pads_short_rows_and_skips_blank_lines() {
        let table = read_csv_table_from_reader("A,B,C\n\n1\n,,\n2,3,4,5\n".as_bytes()).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["1", "", ""]);
        assert_eq!(table.rows[1], vec!["2", "3", "4"]);
    }

    #[test]
    fn column_lookup_ignores_case() {
        let table = read_csv_table_from_reader("Hours Note,Other\n".as_bytes()).unwrap();
        assert_eq!(table.column_index(" hours note "), Some(0));
        assert_eq!(table.column_index("missing"), None);
    }

    #[test]
    fn duplicate_headers_are_rejected() {
        let table = read_csv_table_from_reader("Hours Note,HOURS NOTE\n".as_bytes()).unwrap();
        assert_eq!(
            table.check_unique_headers(),
            Err(InputSchemaError::DuplicateColumn {
                column: "HOURS NOTE".to_string()
            })
        );
    }
}
