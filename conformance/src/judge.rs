//! Check execution and outcome recording.
//!
//! Runs every check of a case through the JSON call layer and records what
//! came back next to what was expected.

use funarray::call::invoke;
use funarray::contract::Operation;
use funarray::io::config::Limits;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::case::Check;

/// Collected check outcomes for a case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Judgment {
    pub checks: Vec<CheckOutcome>,
}

/// Result of running a single check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CheckOutcome {
    /// The call was expected to return `expected`.
    Value {
        args: Vec<Value>,
        expected: Value,
        actual: Option<Value>,
        error: Option<String>,
        passed: bool,
    },
    /// The call was expected to fail with an error containing `expected_error`.
    Rejected {
        args: Vec<Value>,
        expected_error: String,
        actual: Option<Value>,
        error: Option<String>,
        passed: bool,
    },
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        match self {
            CheckOutcome::Value { passed, .. } | CheckOutcome::Rejected { passed, .. } => *passed,
        }
    }

    /// A call that errored although a value was expected.
    pub fn unexpected_error(&self) -> bool {
        matches!(self, CheckOutcome::Value { error: Some(_), .. })
    }
}

/// Run all checks and collect outcomes.
#[instrument(skip_all, fields(op = op.name(), check_count = checks.len()))]
pub fn run_checks(op: Operation, checks: &[Check], limits: &Limits) -> Judgment {
    let mut outcomes = Vec::with_capacity(checks.len());
    for check in checks {
        let (actual, error) = match invoke(op, &check.args, limits) {
            Ok(value) => (Some(value), None),
            Err(err) => (None, Some(format!("{err:#}"))),
        };
        let outcome = match (&check.expect, &check.expect_error) {
            (_, Some(needle)) => CheckOutcome::Rejected {
                args: check.args.clone(),
                expected_error: needle.clone(),
                passed: error.as_deref().is_some_and(|e| e.contains(needle.as_str())),
                actual,
                error,
            },
            (expected, None) => {
                let expected = expected.clone().unwrap_or(Value::Null);
                CheckOutcome::Value {
                    args: check.args.clone(),
                    passed: actual.as_ref() == Some(&expected),
                    expected,
                    actual,
                    error,
                }
            }
        };
        debug!(passed = outcome.passed(), "check result");
        outcomes.push(outcome);
    }
    Judgment { checks: outcomes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(args: Value, expect: Option<Value>, expect_error: Option<&str>) -> Check {
        Check {
            args: args.as_array().cloned().expect("args array"),
            expect,
            expect_error: expect_error.map(str::to_string),
        }
    }

    #[test]
    fn value_check_passes_and_fails() {
        let checks = vec![
            check(json!([[1, 2]]), Some(json!([[1, 2], [2, 1]])), None),
            check(json!([[1, 2]]), Some(json!([[1, 2]])), None),
        ];
        let judgment = run_checks(Operation::Permute, &checks, &Limits::default());
        assert!(judgment.checks[0].passed());
        assert!(!judgment.checks[1].passed());
        assert!(!judgment.checks[1].unexpected_error());
    }

    #[test]
    fn rejected_check_matches_error_substring() {
        let limits = Limits {
            max_permute_len: 2,
            ..Limits::default()
        };
        let checks = vec![
            check(json!([[1, 2, 3]]), None, Some("max_permute_len")),
            check(json!([[1]]), None, Some("max_permute_len")),
        ];
        let judgment = run_checks(Operation::Permute, &checks, &limits);
        assert!(judgment.checks[0].passed());
        assert!(!judgment.checks[1].passed());
    }

    #[test]
    fn error_on_value_check_is_unexpected() {
        let checks = vec![check(json!(["x", [1]]), Some(json!([1])), None)];
        let judgment = run_checks(Operation::Take, &checks, &Limits::default());
        assert!(!judgment.checks[0].passed());
        assert!(judgment.checks[0].unexpected_error());
    }
}
