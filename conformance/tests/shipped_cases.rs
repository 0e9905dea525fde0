//! Runs every shipped case file through the conformance binary.

use std::path::Path;
use std::process::Command;

fn conformance(results: &Path, args: &[&str]) -> std::process::Output {
    let cases = Path::new(env!("CARGO_MANIFEST_DIR")).join("cases");
    Command::new(env!("CARGO_BIN_EXE_conformance"))
        .arg("--cases")
        .arg(&cases)
        .arg("--results")
        .arg(results)
        .args(args)
        .output()
        .expect("spawn conformance")
}

#[test]
fn every_shipped_case_succeeds() {
    let temp = tempfile::tempdir().expect("tempdir");
    let results = temp.path().join("results");

    let out = conformance(&results, &["run"]);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        out.status.success(),
        "stdout:\n{stdout}\nstderr:\n{}",
        String::from_utf8_lossy(&out.stderr)
    );
    assert!(stdout.contains("failed=0"));

    let out = conformance(&results, &["report"]);
    let report = String::from_utf8_lossy(&out.stdout);
    assert!(report.contains("fail=0 error=0"), "report:\n{report}");
}

#[test]
fn run_single_case_then_clean() {
    let temp = tempfile::tempdir().expect("tempdir");
    let results = temp.path().join("results");

    let out = conformance(&results, &["run", "permute"]);
    assert!(out.status.success());
    assert!(results.join("permute.json").exists());

    let out = conformance(&results, &["clean", "permute"]);
    assert!(out.status.success());
    assert!(!results.join("permute.json").exists());
}

#[test]
fn unknown_case_fails() {
    let temp = tempfile::tempdir().expect("tempdir");
    let out = conformance(temp.path(), &["run", "no-such-case"]);
    assert!(!out.status.success());
}
