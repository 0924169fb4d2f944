//! TOML configuration.
//!
//! Every section and field is optional; missing values take the defaults
//! below. Command-line flags override whatever the file sets.
//!
//! ```toml
//! [extraction]
//! extractor = "completions"
//! requests_per_minute = 120
//!
//! [extraction.completions]
//! endpoint = "https://example.openai.azure.com"
//! deployment = "hours-clean"
//!
//! [extraction.retry]
//! max_retries = 3
//! initial_backoff_ms = 500
//!
//! [pipeline]
//! workers = 8
//!
//! [output]
//! time_format = "24h"
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use hours_extract::{CompletionsConfig, RetryPolicy};
use hours_model::columns::UNCLEANED_COLUMN;
use hours_output::TimeFormat;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorKind {
    Completions,
    #[default]
    Plaintext,
}

impl ExtractorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractorKind::Completions => "completions",
            ExtractorKind::Plaintext => "plaintext",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub extraction: ExtractionSection,
    pub pipeline: PipelineSection,
    pub output: OutputSection,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExtractionSection {
    pub extractor: ExtractorKind,
    /// Shared across all workers; 0 disables limiting.
    pub requests_per_minute: u32,
    pub completions: CompletionsConfig,
    pub retry: RetryPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PipelineSection {
    pub workers: usize,
    pub preserve_order: bool,
}

impl Default for PipelineSection {
    fn default() -> Self {
        Self {
            workers: 4,
            preserve_order: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub time_format: TimeFormat,
    pub keep_uncleaned: bool,
    pub uncleaned_column: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            time_format: TimeFormat::default(),
            keep_uncleaned: false,
            uncleaned_column: UNCLEANED_COLUMN.to_string(),
        }
    }
}

/// Load `path`, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let Some(path) = path else {
        return Ok(AppConfig::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let config = parse_config(&text).with_context(|| format!("parse {}", path.display()))?;
    debug!(path = %path.display(), extractor = config.extraction.extractor.as_str(), "loaded configuration");
    Ok(config)
}

pub fn parse_config(text: &str) -> Result<AppConfig> {
    Ok(toml::from_str(text)?)
}
