//! Case execution orchestration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use funarray::io::config::Limits;
use tracing::{info, instrument};

use crate::case::CaseFile;
use crate::config::apply_case_limits;
use crate::judge::run_checks;
use crate::outcome::{Outcome, classify_outcome};
use crate::results::{CaseRecord, write_record};

/// Result of running a single case.
#[derive(Debug)]
pub struct RunOutcome {
    pub outcome: Outcome,
    pub passed: usize,
    pub total: usize,
    pub record_path: PathBuf,
}

/// Run every check of a case and persist the record.
#[instrument(skip_all, fields(case_id = %case.case.id))]
pub fn run_case(results_dir: &Path, case: &CaseFile) -> Result<RunOutcome> {
    let op = case.operation()?;
    let limits = apply_case_limits(Limits::default(), &case.limits).context("case limits")?;

    let judgment = run_checks(op, &case.checks, &limits);
    let outcome = classify_outcome(&judgment);
    let passed = judgment.checks.iter().filter(|check| check.passed()).count();
    let total = judgment.checks.len();

    let record = CaseRecord {
        case_id: case.case.id.clone(),
        op: case.case.op.clone(),
        outcome,
        judgment,
    };
    let record_path = write_record(results_dir, &record).context("write record")?;
    info!(outcome = ?outcome, passed, total, "case run complete");

    Ok(RunOutcome {
        outcome,
        passed,
        total,
        record_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::load_record;
    use tempfile::tempdir;

    #[test]
    fn runs_case_and_writes_record() {
        let case = CaseFile::parse_str(
            r#"
[case]
id = "take"
op = "take"

[[checks]]
args = [2, [4, 5, 6]]
expect = [4, 5]

[[checks]]
args = [2, [4, 5, 6]]
expect = [5, 6]
"#,
        )
        .expect("case");
        let temp = tempdir().expect("tempdir");
        let run = run_case(temp.path(), &case).expect("run");
        assert_eq!(run.outcome, Outcome::Fail);
        assert_eq!((run.passed, run.total), (1, 2));
        let record = load_record(&run.record_path).expect("record");
        assert_eq!(record.op, "take");
        assert_eq!(record.outcome, Outcome::Fail);
    }

    #[test]
    fn case_limits_apply_to_calls() {
        let case = CaseFile::parse_str(
            r#"
[case]
id = "tight-unfold"
op = "iterate"

[limits]
max_unfold_steps = 3

[[checks]]
args = [{ add = 1 }, { gt = 100 }, 0]
expect_error = "max_unfold_steps"
"#,
        )
        .expect("case");
        let temp = tempdir().expect("tempdir");
        let run = run_case(temp.path(), &case).expect("run");
        assert_eq!(run.outcome, Outcome::Success);
    }
}
