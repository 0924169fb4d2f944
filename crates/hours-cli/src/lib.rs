//! CLI library components for the hours cleanser.

#![allow(missing_docs)]

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod types;
