//! Fact normalization for extracted hours.
//!
//! Turns the loosely-typed `RawFacts` produced by extraction into canonical
//! `ScheduleFact`s:
//!
//! - **anchor**: day, day-range, ordinal weekday, day-of-month and date recognition
//! - **time**: time token parsing and open/close resolution
//! - **normalizer**: entry-by-entry conversion with per-entry errors

pub mod anchor;
pub mod normalizer;
pub mod time;

pub use anchor::{Anchor, AnchorError, mentions_closure, parse_anchor};
pub use normalizer::{Normalized, normalize};
pub use time::{TimeToken, parse_time_token, resolve_interval};
