use anyhow::Result;
use tracing::info;

use hours_cli::config::{AppConfig, load_config};
use hours_cli::pipeline::{
    CleanSettings, export_training_data, parse_text, run_check, run_clean,
};
use hours_cli::types::{CheckResult, CleanResult, ParseResult};
use hours_model::columns::UNCLEANED_COLUMN;

use crate::cli::{CheckArgs, CleanArgs, ParseArgs, TrainingDataArgs};

pub fn run_clean_command(args: &CleanArgs, log_data: bool) -> Result<CleanResult> {
    let config = load_config(args.config.as_deref())?;
    let settings = CleanSettings {
        input: args.input.clone(),
        output: args.output.clone(),
        errors: args.errors.clone(),
        manifest: args.manifest.clone(),
        config: apply_overrides(config, args),
        dry_run: args.dry_run,
        log_data,
    };
    run_clean(&settings)
}

/// Flags win over the config file.
fn apply_overrides(mut config: AppConfig, args: &CleanArgs) -> AppConfig {
    if let Some(extractor) = args.extractor {
        config.extraction.extractor = extractor.into();
    }
    if let Some(workers) = args.workers {
        config.pipeline.workers = workers;
    }
    if let Some(column) = &args.uncleaned_column {
        config.output.uncleaned_column = column.clone();
    }
    if args.keep_uncleaned {
        config.output.keep_uncleaned = true;
    }
    if let Some(format) = args.time_format {
        config.output.time_format = format.into();
    }
    config
}

pub fn run_check_command(args: &CheckArgs) -> Result<CheckResult> {
    let column = args.uncleaned_column.as_deref().unwrap_or(UNCLEANED_COLUMN);
    run_check(&args.input, column)
}

pub fn run_parse_command(args: &ParseArgs, log_data: bool) -> ParseResult {
    parse_text(&args.text, args.time_format.into(), log_data)
}

pub fn run_training_data_command(args: &TrainingDataArgs) -> Result<usize> {
    let written = export_training_data(
        &args.input,
        &args.output,
        &args.input_column,
        &args.output_column,
    )?;
    info!(written, "training data export complete");
    Ok(written)
}
