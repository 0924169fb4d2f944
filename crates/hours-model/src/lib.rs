//! Schedule model for pantry hours cleansing.
//!
//! This crate holds the fixed record shapes shared by every stage:
//!
//! - **enums**: weekdays, week-of-month ordinals and recurrence kinds
//! - **interval**: minute-of-day open/close pairs
//! - **date**: calendar dates that may omit the year
//! - **fact**: the canonical `ScheduleFact` sum type
//! - **raw**: the versioned extraction payload (`RawFacts`)
//! - **program**: program input records and extraction hints
//! - **row**: materialized output rows
//! - **columns**: the tabular hours schema
//! - **calendar**: which facts apply on a concrete date
//! - **error** / **report**: the error taxonomy and per-program diagnostics

pub mod calendar;
pub mod columns;
pub mod date;
pub mod enums;
pub mod error;
pub mod fact;
pub mod interval;
pub mod program;
pub mod raw;
pub mod report;
pub mod row;

pub use calendar::{DayResolution, resolve_day};
pub use columns::HoursColumn;
pub use date::CalendarDate;
pub use enums::{DayOfWeek, WeekOfMonth};
pub use error::{InputSchemaError, ModelError, NormalizationError, ValidationError};
pub use fact::{FactKey, ScheduleFact};
pub use interval::{Interval, MAX_INTERVALS, MINUTES_PER_DAY};
pub use program::{ProgramContext, ProgramInput};
pub use raw::{RAW_FACTS_VERSION, RawEntry, RawFacts};
pub use report::{CleansingError, CleansingNotice, Stage};
pub use row::OutputRow;
