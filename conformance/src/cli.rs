//! CLI command implementations.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use crate::case::discover_cases;
use crate::outcome::Outcome;
use crate::report::aggregate;
use crate::results::record_path;
use crate::run::run_case;

/// List all available cases.
pub fn list_cases(cases_dir: &Path) -> Result<()> {
    for case in discover_cases(cases_dir)? {
        println!("{} {}", case.case.id, case.case.op);
    }
    Ok(())
}

/// Run one case by id, or every case when `case_id` is `None`.
///
/// Fails when any case does not succeed.
pub fn run_cases(cases_dir: &Path, results_dir: &Path, case_id: Option<&str>) -> Result<()> {
    let mut cases = discover_cases(cases_dir)?;
    if let Some(case_id) = case_id {
        cases.retain(|case| case.case.id == case_id);
        if cases.is_empty() {
            bail!("case {} not found in {}", case_id, cases_dir.display());
        }
    }
    debug!(count = cases.len(), "cases loaded");

    let mut failed = 0;
    for case in &cases {
        let run = run_case(results_dir, case).context("run case")?;
        let label = if run.outcome == Outcome::Success {
            "pass"
        } else {
            failed += 1;
            "fail"
        };
        println!(
            "{}: case={} outcome={:?} checks={}/{} record={}",
            label,
            case.case.id,
            run.outcome,
            run.passed,
            run.total,
            run.record_path.display()
        );
    }
    info!(cases = cases.len(), failed, "run finished");
    println!("run: cases={} failed={}", cases.len(), failed);
    if failed > 0 {
        bail!("{} of {} cases did not succeed", failed, cases.len());
    }
    Ok(())
}

/// Show aggregated results.
pub fn report(results_dir: &Path) -> Result<()> {
    let (summary, warnings) = aggregate(results_dir)?;
    println!("report: cases={}", summary.cases);
    println!(
        "report: success={} fail={} error={}",
        summary.success, summary.fail, summary.error
    );
    for (op, (passed, total)) in summary.check_pass_rates {
        println!("report: op {} {}/{}", op, passed, total);
    }
    for warning in warnings {
        eprintln!("warning: {}", warning);
    }
    Ok(())
}

/// Remove one case's record, or the whole results directory.
pub fn clean(results_dir: &Path, case_id: Option<&str>) -> Result<()> {
    match case_id {
        Some(case_id) => {
            let path = record_path(results_dir, case_id);
            if path.exists() {
                fs::remove_file(&path).with_context(|| format!("remove {}", path.display()))?;
            }
            println!("clean: case={} record={}", case_id, path.display());
        }
        None => {
            if results_dir.exists() {
                fs::remove_dir_all(results_dir)
                    .with_context(|| format!("remove {}", results_dir.display()))?;
            }
            println!("clean: results={}", results_dir.display());
        }
    }
    Ok(())
}
