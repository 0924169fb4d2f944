//! End-to-end tests for the command implementations, using the offline extractor.

use std::fs;
use std::path::PathBuf;

use hours_cli::config::parse_config;
use hours_cli::pipeline::{CleanSettings, export_training_data, run_check, run_clean};
use hours_core::ProgramStatus;
use hours_output::RunManifest;
use tempfile::TempDir;

const HEADER: &str = "Program External ID,Program Name,Hours Uncleaned,Hours Day of Week,Hours Open 1,Hours Closed 1,Hours Open 2,Hours Closed 2,Hours Open 3,Hours Closed 3,Hours Note,Hours Week of Month,Hours Day of Month,Hours Specific Date,Hours Specific Date Closed Indicator,Hours Specific Date Reason";

fn write_input(dir: &TempDir, rows: &[&str]) -> PathBuf {
    let path = dir.path().join("programs.csv");
    let mut contents = format!("{HEADER}\n");
    for row in rows {
        contents.push_str(row);
        contents.push('\n');
    }
    fs::write(&path, contents).expect("write input");
    path
}

fn sample_input(dir: &TempDir) -> PathBuf {
    write_input(
        dir,
        &[
            "P1,Eastside Pantry,\"Mon-Wed 9am-5pm, closed 12/25\",,,,,,,,,,,,,",
            "P2,Westside,9-5,,,,,,,,,,,,,",
            "P3,Northside,,,,,,,,,,,,,,",
        ],
    )
}

#[test]
fn clean_writes_rows_errors_and_manifest() {
    let dir = TempDir::new().expect("temp dir");
    let input = sample_input(&dir);
    let result = run_clean(&CleanSettings::new(&input)).expect("clean");

    assert!(result.has_errors());
    assert_eq!(result.extractor, "plaintext");
    let counts = result.report.counts;
    assert_eq!((counts.total, counts.succeeded, counts.failed, counts.empty), (3, 1, 1, 1));

    let output_path = result.output_path.expect("output path");
    assert_eq!(output_path, dir.path().join("programs.cleaned.csv"));
    let output = fs::read_to_string(&output_path).expect("read output");
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("Program External ID,Program Name,Hours Day of Week,"));
    assert!(!lines[0].contains("Hours Uncleaned"));
    assert!(lines.contains(&"P1,Eastside Pantry,Monday,9:00 AM,5:00 PM,,,,,,,,,,"));
    assert!(lines.contains(&"P1,Eastside Pantry,,,,,,,,,,,12/25,Y,"));
    assert!(lines.iter().all(|line| !line.starts_with("P2") && !line.starts_with("P3")));

    let errors = fs::read_to_string(result.error_report_path.expect("error path"))
        .expect("read error report");
    insta::assert_snapshot!(errors, @r"
    program_id,stage,message
    P2,normalization,entry 1: no recurrence anchor found
    ");

    let manifest: RunManifest = serde_json::from_str(
        &fs::read_to_string(result.manifest_path.expect("manifest path")).expect("read manifest"),
    )
    .expect("parse manifest");
    assert_eq!(manifest.rows, 4);
    assert_eq!(manifest.errors, 1);
    assert_eq!(manifest.programs, counts);
    assert_eq!(manifest.input_sha256.len(), 64);
    assert_eq!(manifest.extractor, "plaintext");
    assert_eq!(manifest.time_format, "12h");
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().expect("temp dir");
    let input = sample_input(&dir);
    let settings = CleanSettings {
        dry_run: true,
        ..CleanSettings::new(&input)
    };
    let result = run_clean(&settings).expect("clean");
    assert_eq!(result.report.rows.len(), 4);
    assert!(result.output_path.is_none());
    assert!(!settings.output_path().exists());
    assert!(!settings.manifest_path().exists());
}

#[test]
fn config_controls_format_workers_and_provenance() {
    let dir = TempDir::new().expect("temp dir");
    let input = sample_input(&dir);
    let config = parse_config(
        r#"
        [pipeline]
        workers = 1

        [output]
        time_format = "24h"
        keep_uncleaned = true
        "#,
    )
    .expect("config");
    let settings = CleanSettings {
        config,
        output: Some(dir.path().join("out").join("rows.csv")),
        ..CleanSettings::new(&input)
    };
    run_clean(&settings).expect("clean");
    let output = fs::read_to_string(dir.path().join("out").join("rows.csv")).expect("read output");
    let lines: Vec<&str> = output.lines().collect();
    assert!(lines[0].starts_with("Program External ID,Program Name,Hours Uncleaned,"));
    assert!(lines.contains(
        &"P1,Eastside Pantry,\"Mon-Wed 9am-5pm, closed 12/25\",Tuesday,09:00,17:00,,,,,,,,,,"
    ));
}

#[test]
fn repeated_runs_are_byte_identical() {
    let dir = TempDir::new().expect("temp dir");
    let input = sample_input(&dir);
    let render = |name: &str, workers: usize| {
        let mut settings = CleanSettings {
            output: Some(dir.path().join(name)),
            ..CleanSettings::new(&input)
        };
        settings.config.pipeline.workers = workers;
        run_clean(&settings).expect("clean");
        fs::read(dir.path().join(name)).expect("read output")
    };
    assert_eq!(render("one.csv", 1), render("eight.csv", 8));
}

#[test]
fn duplicate_program_id_aborts_before_extraction() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(
        &dir,
        &[
            "P1,A,Mon 9-5,,,,,,,,,,,,,",
            "P1,B,Tue 9-5,,,,,,,,,,,,,",
        ],
    );
    let settings = CleanSettings::new(&input);
    let error = run_clean(&settings).expect_err("duplicate ids");
    assert!(format!("{error:#}").contains("P1"));
    assert!(!settings.output_path().exists());
    assert!(!settings.error_report_path().exists());
}

#[test]
fn blank_program_id_is_reported_per_program() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_input(
        &dir,
        &[",A,Mon 9-5,,,,,,,,,,,,,", "P2,B,Sat 10am-2pm,,,,,,,,,,,,,"],
    );
    let result = run_clean(&CleanSettings::new(&input)).expect("clean");
    assert_eq!(result.report.counts.failed, 1);
    assert_eq!(result.report.counts.succeeded, 1);
    assert_eq!(result.report.errors[0].row_number, 1);
    assert!(result.report.rows.iter().all(|row| row.program_id == "P2"));
}

#[test]
fn check_reports_schema_without_extracting() {
    let dir = TempDir::new().expect("temp dir");
    let input = sample_input(&dir);
    let result = run_check(&input, "Hours Uncleaned").expect("check");
    assert_eq!(result.programs, 3);
    assert_eq!(result.blank_hours, 1);
    assert_eq!(result.pass_through, vec!["Program Name".to_string()]);

    let missing = dir.path().join("missing.csv");
    fs::write(&missing, "Program External ID,Hours Uncleaned\nP1,Mon 9-5\n").expect("write");
    let error = run_check(&missing, "Hours Uncleaned").expect_err("missing columns");
    assert!(format!("{error:#}").contains("Hours Day of Week"));
}

#[test]
fn training_data_export_escapes_json() {
    let dir = TempDir::new().expect("temp dir");
    let input = dir.path().join("pairs.csv");
    fs::write(
        &input,
        "raw,clean\n\"Mon \"\"late\"\" 9-5\",\"Monday,9:00 AM,5:00 PM\"\n,ignored\n",
    )
    .expect("write pairs");
    let output = dir.path().join("train.jsonl");
    let written = export_training_data(&input, &output, "raw", "clean").expect("export");
    assert_eq!(written, 1);
    let contents = fs::read_to_string(&output).expect("read jsonl");
    let record: serde_json::Value =
        serde_json::from_str(contents.lines().next().expect("one line")).expect("json line");
    assert_eq!(record["prompt"], "Mon \"late\" 9-5");
    assert_eq!(record["completion"], "Monday,9:00 AM,5:00 PM%%");

    assert!(export_training_data(&input, &output, "raw", "nope").is_err());
}

#[test]
fn per_program_status_is_exposed() {
    let result = hours_cli::pipeline::parse_text("9-5", hours_output::TimeFormat::TwelveHour, false);
    assert_eq!(result.outcome.status, ProgramStatus::Failed);
}
