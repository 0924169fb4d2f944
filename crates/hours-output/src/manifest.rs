//! JSON run manifest written next to the cleansed output.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use hours_model::CleansingNotice;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::ensure_parent_dir;

const BUFFER_SIZE: usize = 65536;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramCounts {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Programs that produced no rows and no errors (blank hours text).
    pub empty: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub input_path: PathBuf,
    pub input_sha256: String,
    pub output_path: Option<PathBuf>,
    pub error_report_path: Option<PathBuf>,
    pub programs: ProgramCounts,
    pub rows: usize,
    pub errors: usize,
    pub notices: Vec<CleansingNotice>,
    pub extractor: String,
    pub time_format: String,
    /// RFC 3339, UTC.
    pub generated_at: String,
}

/// Current UTC time in the manifest's timestamp format.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Compute the SHA-256 of a file as lowercase hex.
pub fn compute_file_sha256(path: &Path) -> Result<String> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut reader = BufReader::with_capacity(BUFFER_SIZE, file);
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];
    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .with_context(|| format!("read {}", path.display()))?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }
    let hash = hex::encode(hasher.finalize());
    debug!(path = %path.display(), sha256 = %hash, "hashed input");
    Ok(hash)
}

pub fn write_manifest(path: &Path, manifest: &RunManifest) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), manifest)
        .with_context(|| format!("write manifest {}", path.display()))?;
    info!(path = %path.display(), "wrote run manifest");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn hashes_file_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("input.csv");
        fs::write(&path, b"Hello, World!").unwrap();
        assert_eq!(
            compute_file_sha256(&path).unwrap(),
            "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f"
        );
    }

    #[test]
    fn manifest_round_trips_through_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("manifest.json");
        let manifest = RunManifest {
            input_path: PathBuf::from("programs.csv"),
            input_sha256: "abc".to_string(),
            output_path: Some(PathBuf::from("cleaned.csv")),
            error_report_path: None,
            programs: ProgramCounts {
                total: 3,
                succeeded: 1,
                failed: 1,
                empty: 1,
            },
            rows: 4,
            errors: 1,
            notices: vec![CleansingNotice::new("P1", "recurring closure")],
            extractor: "plaintext".to_string(),
            time_format: "12h".to_string(),
            generated_at: timestamp_now(),
        };
        write_manifest(&path, &manifest).unwrap();
        let read: RunManifest = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(read, manifest);
    }
}
