use serde::{Deserialize, Serialize};

use crate::judge::Judgment;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    Fail,
    Error,
}

/// `Error` takes precedence over `Fail`.
pub fn classify_outcome(judgment: &Judgment) -> Outcome {
    if judgment.checks.iter().any(|check| check.unexpected_error()) {
        Outcome::Error
    } else if judgment.checks.iter().all(|check| check.passed()) {
        Outcome::Success
    } else {
        Outcome::Fail
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judge::CheckOutcome;
    use serde_json::json;

    fn value_check(passed: bool, error: Option<&str>) -> CheckOutcome {
        CheckOutcome::Value {
            args: Vec::new(),
            expected: json!([]),
            actual: None,
            error: error.map(str::to_string),
            passed,
        }
    }

    #[test]
    fn success_when_all_checks_pass() {
        let judgment = Judgment {
            checks: vec![value_check(true, None)],
        };
        assert_eq!(classify_outcome(&judgment), Outcome::Success);
    }

    #[test]
    fn fail_when_a_value_is_wrong() {
        let judgment = Judgment {
            checks: vec![value_check(true, None), value_check(false, None)],
        };
        assert_eq!(classify_outcome(&judgment), Outcome::Fail);
    }

    #[test]
    fn error_when_a_call_fails_unexpectedly() {
        let judgment = Judgment {
            checks: vec![value_check(false, None), value_check(false, Some("boom"))],
        };
        assert_eq!(classify_outcome(&judgment), Outcome::Error);
    }
}
