use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;

use crate::outcome::Outcome;
use crate::results::{load_record, record_paths};

#[derive(Debug, Default)]
pub struct ReportSummary {
    pub cases: usize,
    pub success: usize,
    pub fail: usize,
    pub error: usize,
    /// Per operation: (checks passed, checks run).
    pub check_pass_rates: BTreeMap<String, (usize, usize)>,
}

pub fn aggregate(results_dir: &Path) -> Result<(ReportSummary, Vec<String>)> {
    let mut summary = ReportSummary::default();
    let mut warnings = Vec::new();

    for path in record_paths(results_dir)? {
        let record = match load_record(&path) {
            Ok(record) => record,
            Err(err) => {
                warnings.push(format!("skip {}: record invalid ({err:#})", path.display()));
                continue;
            }
        };

        summary.cases += 1;
        match record.outcome {
            Outcome::Success => summary.success += 1,
            Outcome::Fail => summary.fail += 1,
            Outcome::Error => summary.error += 1,
        }

        let entry = summary.check_pass_rates.entry(record.op).or_insert((0, 0));
        for check in &record.judgment.checks {
            if check.passed() {
                entry.0 += 1;
            }
            entry.1 += 1;
        }
    }

    Ok((summary, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judge::{CheckOutcome, Judgment};
    use crate::results::{CaseRecord, write_record};
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    fn record(case_id: &str, op: &str, outcome: Outcome, passed: &[bool]) -> CaseRecord {
        let checks = passed
            .iter()
            .map(|&passed| CheckOutcome::Value {
                args: Vec::new(),
                expected: json!(0),
                actual: Some(json!(0)),
                error: None,
                passed,
            })
            .collect();
        CaseRecord {
            case_id: case_id.to_string(),
            op: op.to_string(),
            outcome,
            judgment: Judgment { checks },
        }
    }

    #[test]
    fn aggregates_records() {
        let temp = tempdir().expect("tempdir");
        write_record(temp.path(), &record("a", "take", Outcome::Success, &[true, true]))
            .expect("write a");
        write_record(temp.path(), &record("b", "take", Outcome::Fail, &[true, false]))
            .expect("write b");
        write_record(temp.path(), &record("c", "drop", Outcome::Error, &[false]))
            .expect("write c");

        let (summary, warnings) = aggregate(temp.path()).expect("aggregate");
        assert!(warnings.is_empty());
        assert_eq!(summary.cases, 3);
        assert_eq!(summary.success, 1);
        assert_eq!(summary.fail, 1);
        assert_eq!(summary.error, 1);
        assert_eq!(summary.check_pass_rates.get("take"), Some(&(3, 4)));
        assert_eq!(summary.check_pass_rates.get("drop"), Some(&(0, 1)));
    }

    #[test]
    fn invalid_records_become_warnings() {
        let temp = tempdir().expect("tempdir");
        fs::write(temp.path().join("broken.json"), "{").expect("write broken");
        let (summary, warnings) = aggregate(temp.path()).expect("aggregate");
        assert_eq!(summary.cases, 0);
        assert_eq!(warnings.len(), 1);
    }
}
