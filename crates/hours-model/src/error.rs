//! Error taxonomy for hours cleansing.
//!
//! - `InputSchemaError`: the input table cannot be processed at all.
//! - `NormalizationError`: one raw entry or interval could not be read.
//! - `ValidationError`: a program's facts contradict each other.
//!
//! Extraction failures live with the extraction adapter.

use thiserror::Error;

use crate::{FactKey, Interval};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid calendar date: {0}")]
    InvalidDate(String),
}

/// Fatal to the whole batch; raised before any extraction happens.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputSchemaError {
    /// The table has no header row.
    #[error("input table is empty")]
    Empty,

    /// One or more required columns are absent.
    #[error("missing required column(s): {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    /// A column header appears twice (after case/whitespace folding).
    #[error("duplicate column '{column}'")]
    DuplicateColumn { column: String },

    /// The same program id appears on two rows.
    #[error("duplicate program id '{program_id}' on rows {first_row} and {duplicate_row}")]
    DuplicateProgramId {
        program_id: String,
        first_row: usize,
        duplicate_row: usize,
    },
}

/// Fatal to a single raw entry (or a single interval within it).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NormalizationError {
    #[error("entry {entry}: no recurrence anchor found")]
    NoAnchor { entry: usize },

    #[error("entry {entry}: unrecognized day or date '{anchor}'")]
    UnknownAnchor { entry: usize, anchor: String },

    #[error("entry {entry} ({anchor}): no hours given")]
    MissingTimes { entry: usize, anchor: String },

    #[error("entry {entry} ({anchor}): odd number of time tokens ({count}), incomplete interval")]
    IncompleteInterval {
        entry: usize,
        anchor: String,
        count: usize,
    },

    #[error("entry {entry} ({anchor}): cannot parse time '{token}'")]
    UnparseableTime {
        entry: usize,
        anchor: String,
        token: String,
    },

    #[error("entry {entry} ({anchor}): {count} intervals exceed the limit of 3 per day")]
    TooManyIntervals {
        entry: usize,
        anchor: String,
        count: usize,
    },

    #[error("entry {entry}: invalid date '{anchor}'")]
    InvalidDate { entry: usize, anchor: String },
}

/// Blocks a program's whole fact set from being emitted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("program id is missing")]
    MissingProgramId,

    #[error("duplicate facts for {key}")]
    DuplicateFact { key: FactKey },

    #[error("{key}: interval {interval} does not close after it opens")]
    InvertedInterval { key: FactKey, interval: Interval },

    #[error("{key}: interval {interval} is outside the day")]
    OutOfRange { key: FactKey, interval: Interval },

    #[error("{key}: intervals {first} and {second} overlap")]
    OverlappingIntervals {
        key: FactKey,
        first: Interval,
        second: Interval,
    },

    #[error("{key}: intervals are not ordered by start time")]
    UnorderedIntervals { key: FactKey },

    #[error("{key}: {count} intervals exceed the limit of 3 per day")]
    TooManyIntervals { key: FactKey, count: usize },

    #[error("{key}: no open intervals")]
    NoIntervals { key: FactKey },

    #[error("day of month {day} is outside 1..=31")]
    InvalidDayOfMonth { day: u8 },
}
