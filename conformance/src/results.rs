//! Result persistence.
//!
//! Each case run leaves one `<case_id>.json` record in the results
//! directory; a rerun overwrites it.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::judge::Judgment;
use crate::outcome::Outcome;

/// Persisted outcome of one case run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseRecord {
    pub case_id: String,
    pub op: String,
    pub outcome: Outcome,
    pub judgment: Judgment,
}

pub fn record_path(results_dir: &Path, case_id: &str) -> PathBuf {
    results_dir.join(format!("{case_id}.json"))
}

#[instrument(skip_all, fields(case_id = %record.case_id))]
pub fn write_record(results_dir: &Path, record: &CaseRecord) -> Result<PathBuf> {
    fs::create_dir_all(results_dir)
        .with_context(|| format!("create results dir {}", results_dir.display()))?;
    let path = record_path(results_dir, &record.case_id);
    let contents = serde_json::to_string_pretty(record).context("serialize record")?;
    fs::write(&path, format!("{contents}\n"))
        .with_context(|| format!("write record {}", path.display()))?;
    debug!(path = %path.display(), "record written");
    Ok(path)
}

pub fn load_record(path: &Path) -> Result<CaseRecord> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parse {}", path.display()))
}

/// Record files in the results directory, sorted by path.
pub fn record_paths(results_dir: &Path) -> Result<Vec<PathBuf>> {
    if !results_dir.exists() {
        return Ok(Vec::new());
    }
    let mut paths = Vec::new();
    for entry in fs::read_dir(results_dir)
        .with_context(|| format!("read {}", results_dir.display()))?
    {
        let path = entry.context("read entry")?.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn record_path_is_stable() {
        let path = record_path(Path::new("/tmp/results"), "permute");
        assert_eq!(path, PathBuf::from("/tmp/results/permute.json"));
    }

    #[test]
    fn write_then_load_record() {
        let temp = tempdir().expect("tempdir");
        let results = temp.path().join("results");
        let record = CaseRecord {
            case_id: "empty".to_string(),
            op: "empty".to_string(),
            outcome: Outcome::Success,
            judgment: Judgment { checks: Vec::new() },
        };
        let path = write_record(&results, &record).expect("write");
        assert_eq!(load_record(&path).expect("load"), record);
        assert_eq!(record_paths(&results).expect("paths"), vec![path]);
    }

    #[test]
    fn missing_results_dir_has_no_records() {
        let temp = tempdir().expect("tempdir");
        let paths = record_paths(&temp.path().join("missing")).expect("paths");
        assert!(paths.is_empty());
    }
}
