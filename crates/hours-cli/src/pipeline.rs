//! Command implementations shared by the binary and the integration tests.
//!
//! `clean` runs in four stages: ingest the program table, build the
//! extraction adapter, run the concurrent pipeline, then write the rows, the
//! error report and the manifest.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use hours_core::{CleansingPipeline, CleansingReport, PipelineOptions, process_program};
use hours_extract::{CompletionsClient, ExtractionAdapter, PlaintextExtractor, RateLimiter};
use hours_ingest::{IngestOptions, ProgramSet, load_programs, read_csv_table};
use hours_model::columns::PROGRAM_ID_COLUMN;
use hours_model::{HoursColumn, ProgramInput};
use hours_output::{
    OutputLayout, ProgramCounts, RunManifest, TimeFormat, compute_file_sha256, timestamp_now,
    training_examples, write_error_report_csv, write_manifest, write_rows_csv,
    write_training_jsonl,
};
use tracing::{debug, info, info_span, warn};

use crate::config::{AppConfig, ExtractionSection, ExtractorKind};
use crate::logging::redact_value;
use crate::types::{CheckResult, CleanResult, ParseResult};

/// Everything `clean` needs once flags and the config file are merged.
#[derive(Debug, Clone)]
pub struct CleanSettings {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub errors: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
    pub config: AppConfig,
    pub dry_run: bool,
    pub log_data: bool,
}

impl CleanSettings {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            errors: None,
            manifest: None,
            config: AppConfig::default(),
            dry_run: false,
            log_data: false,
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| sibling_path(&self.input, "cleaned.csv"))
    }

    pub fn error_report_path(&self) -> PathBuf {
        self.errors
            .clone()
            .unwrap_or_else(|| sibling_path(&self.input, "errors.csv"))
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.manifest
            .clone()
            .unwrap_or_else(|| sibling_path(&self.input, "manifest.json"))
    }
}

/// `programs.csv` with suffix `cleaned.csv` becomes `programs.cleaned.csv`.
fn sibling_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "programs".to_string());
    input.with_file_name(format!("{stem}.{suffix}"))
}

/// Build the adapter for the configured collaborator.
pub fn build_adapter(extraction: &ExtractionSection) -> Result<ExtractionAdapter> {
    let adapter = match extraction.extractor {
        ExtractorKind::Completions => {
            let client = CompletionsClient::from_env(extraction.completions.clone())
                .context("configure completions client")?;
            ExtractionAdapter::new(Arc::new(client))
        }
        ExtractorKind::Plaintext => ExtractionAdapter::new(Arc::new(PlaintextExtractor::new())),
    };
    Ok(adapter
        .with_retry(extraction.retry.clone())
        .with_rate_limiter(Arc::new(RateLimiter::per_minute(
            extraction.requests_per_minute,
        ))))
}

/// Cleanse the program table named by `settings`.
pub fn run_clean(settings: &CleanSettings) -> Result<CleanResult> {
    let adapter = build_adapter(&settings.config.extraction)?;
    clean_with_adapter(settings, adapter)
}

/// Cleanse with a caller-supplied adapter.
///
/// Schema problems abort before any extraction; per-program failures end up
/// in the report.
pub fn clean_with_adapter(settings: &CleanSettings, adapter: ExtractionAdapter) -> Result<CleanResult> {
    let span = info_span!("clean", input = %settings.input.display());
    let _guard = span.enter();
    let start = Instant::now();
    let config = &settings.config;

    let set = ingest(&settings.input, &config.output.uncleaned_column)?;
    let layout = OutputLayout::from_input(
        &set.headers,
        &set.uncleaned_column,
        config.output.keep_uncleaned,
    );
    let extractor = adapter.collaborator_name().to_string();
    let options = PipelineOptions {
        preserve_order: config.pipeline.preserve_order,
        log_data: settings.log_data,
        ..PipelineOptions::default()
    }
    .with_workers(config.pipeline.workers);

    let report = run_pipeline(adapter, options, set.programs)?;
    let time_format = config.output.time_format;

    let mut result = CleanResult {
        input: settings.input.clone(),
        output_path: None,
        error_report_path: None,
        manifest_path: None,
        extractor,
        time_format,
        report,
    };
    if settings.dry_run {
        info!("dry run, no files written");
        return Ok(result);
    }

    let output_path = settings.output_path();
    write_rows_csv(&output_path, &layout, &result.report.rows, time_format)
        .context("write cleansed rows")?;
    let error_report_path = settings.error_report_path();
    write_error_report_csv(&error_report_path, &result.report.errors)
        .context("write error report")?;

    let manifest = RunManifest {
        input_path: settings.input.clone(),
        input_sha256: compute_file_sha256(&settings.input)?,
        output_path: Some(output_path.clone()),
        error_report_path: Some(error_report_path.clone()),
        programs: result.report.counts,
        rows: result.report.rows.len(),
        errors: result.report.errors.len(),
        notices: result.report.notices.clone(),
        extractor: result.extractor.clone(),
        time_format: time_format.as_str().to_string(),
        generated_at: timestamp_now(),
    };
    let manifest_path = settings.manifest_path();
    write_manifest(&manifest_path, &manifest).context("write run manifest")?;

    debug!(elapsed_ms = start.elapsed().as_millis() as u64, "clean finished");
    result.output_path = Some(output_path);
    result.error_report_path = Some(error_report_path);
    result.manifest_path = Some(manifest_path);
    Ok(result)
}

fn ingest(input: &Path, uncleaned_column: &str) -> Result<ProgramSet> {
    let options = IngestOptions {
        uncleaned_column: uncleaned_column.to_string(),
    };
    load_programs(input, &options).with_context(|| format!("load programs from {}", input.display()))
}

/// Drive the pipeline on a fresh runtime. Ctrl-C stops new programs from
/// starting; the ones in flight finish and are reported.
fn run_pipeline(
    adapter: ExtractionAdapter,
    options: PipelineOptions,
    programs: Vec<ProgramInput>,
) -> Result<CleansingReport> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("start async runtime")?;
    let pipeline = CleansingPipeline::new(adapter, options);
    let cancel = pipeline.cancel_handle();
    let report = runtime.block_on(async move {
        let watcher = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("interrupt received, finishing programs in flight");
                cancel.cancel();
            }
        });
        let report = pipeline.run(programs).await;
        watcher.abort();
        report
    });
    Ok(report)
}

/// Validate the input schema without extracting anything.
pub fn run_check(input: &Path, uncleaned_column: &str) -> Result<CheckResult> {
    let set = ingest(input, uncleaned_column)?;
    let pass_through = set
        .headers
        .iter()
        .filter(|header| {
            !header.trim().eq_ignore_ascii_case(PROGRAM_ID_COLUMN)
                && !header.trim().eq_ignore_ascii_case(set.uncleaned_column.trim())
                && HoursColumn::from_header(header).is_none()
        })
        .cloned()
        .collect();
    let blank_hours = set
        .programs
        .iter()
        .filter(|program| program.raw_hours_text.trim().is_empty())
        .count();
    Ok(CheckResult {
        input: input.to_path_buf(),
        programs: set.len(),
        blank_hours,
        uncleaned_column: set.uncleaned_column,
        pass_through,
    })
}

/// Cleanse one string with the offline extractor.
pub fn parse_text(text: &str, time_format: TimeFormat, log_data: bool) -> ParseResult {
    debug!(text = %redact_value(text), "parsing hours text");
    let adapter = ExtractionAdapter::new(Arc::new(PlaintextExtractor::new()));
    let mut input = ProgramInput::new("parse", text);
    input.row_number = 1;
    ParseResult {
        layout: OutputLayout::canonical(),
        time_format,
        outcome: process_program(&adapter, &input, log_data),
    }
}

/// Write prompt/completion pairs as JSONL. Returns the number written.
pub fn export_training_data(
    input: &Path,
    output: &Path,
    input_column: &str,
    output_column: &str,
) -> Result<usize> {
    let table = read_csv_table(input).with_context(|| format!("read {}", input.display()))?;
    let examples = training_examples(&table, input_column, output_column)?;
    write_training_jsonl(output, &examples)?;
    info!(examples = examples.len(), path = %output.display(), "wrote training data");
    Ok(examples.len())
}

/// Counts formatted for log lines and the summary footer.
pub fn describe_counts(counts: &ProgramCounts) -> String {
    format!(
        "{} programs: {} succeeded, {} failed, {} empty",
        counts.total, counts.succeeded, counts.failed, counts.empty
    )
}
