//! Cleansing pipeline orchestration.
//!
//! Each program runs through extraction, normalization, validation and row
//! expansion. Programs are independent: a failure is recorded against its
//! program and never aborts the batch.
//!
//! - **process**: the stages for a single program
//! - **pipeline**: bounded concurrent execution with ordered collection
//! - **report**: the accumulated rows, errors and notices

pub mod options;
pub mod pipeline;
pub mod process;
pub mod report;

pub use options::PipelineOptions;
pub use pipeline::{CancelHandle, CleansingPipeline};
pub use process::{ProgramOutcome, ProgramStatus, process_program};
pub use report::CleansingReport;
