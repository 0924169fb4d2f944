//! Program table ingestion.
//!
//! Reads the program CSV, resolves the hours schema columns and turns each
//! data row into a `ProgramInput`. Schema problems (missing columns, duplicate
//! program ids) are reported here, before any extraction work starts.

pub mod csv_table;
pub mod error;
pub mod programs;

pub use csv_table::{CsvTable, read_csv_table, read_csv_table_from_reader};
pub use error::{IngestError, Result};
pub use programs::{IngestOptions, ProgramSet, load_programs, programs_from_table};
