//! Case file parsing and validation.
//!
//! A case pins one operation and lists argument tuples with the value (or
//! error) each must produce. See `conformance/cases/` for the shipped set.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use funarray::contract::Operation;
use serde::Deserialize;
use serde_json::Value;

/// A parsed case file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CaseFile {
    pub case: CaseMeta,
    #[serde(default)]
    pub limits: CaseLimits,
    #[serde(default)]
    pub checks: Vec<Check>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CaseMeta {
    /// Unique identifier (slug format: `[a-z0-9_-]+`).
    pub id: String,
    /// Operation name as accepted by `funarray call`.
    pub op: String,
}

/// Limit overrides applied on top of the defaults for this case only.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct CaseLimits {
    pub max_permute_len: Option<usize>,
    pub max_result_len: Option<usize>,
    pub max_unfold_steps: Option<usize>,
}

/// One call and its expectation.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Check {
    /// The full argument tuple.
    pub args: Vec<Value>,
    /// Exact JSON result.
    pub expect: Option<Value>,
    /// Substring of the error the call must fail with.
    pub expect_error: Option<String>,
}

impl CaseFile {
    /// Load and validate a case file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("read case {}", path.display()))?;
        Self::parse_str(&contents).with_context(|| format!("case {}", path.display()))
    }

    pub fn parse_str(contents: &str) -> Result<Self> {
        let case: CaseFile = toml::from_str(contents).context("parse case")?;
        case.validate()?;
        Ok(case)
    }

    /// The operation this case exercises; validated on load.
    pub fn operation(&self) -> Result<Operation> {
        Operation::from_name(&self.case.op)
            .ok_or_else(|| anyhow!("case.op '{}' is not a known operation", self.case.op))
    }

    fn validate(&self) -> Result<()> {
        validate_case_id(&self.case.id)?;
        self.operation()?;
        for (name, value) in [
            ("max_permute_len", self.limits.max_permute_len),
            ("max_result_len", self.limits.max_result_len),
            ("max_unfold_steps", self.limits.max_unfold_steps),
        ] {
            if value == Some(0) {
                bail!("limits.{name} must be > 0");
            }
        }
        if self.checks.is_empty() {
            bail!("checks must be a non-empty array");
        }
        for (index, check) in self.checks.iter().enumerate() {
            check
                .validate()
                .with_context(|| format!("checks[{}] invalid", index))?;
        }
        Ok(())
    }
}

impl Check {
    fn validate(&self) -> Result<()> {
        match (&self.expect, &self.expect_error) {
            (Some(_), None) => Ok(()),
            (None, Some(needle)) if !needle.trim().is_empty() => Ok(()),
            (None, Some(_)) => bail!("expect_error must be non-empty"),
            (None, None) => bail!("one of expect or expect_error is required"),
            (Some(_), Some(_)) => bail!("expect and expect_error are mutually exclusive"),
        }
    }
}

/// Discover and load all case files from a directory.
///
/// Returns cases sorted by id. Errors if duplicate ids are found.
pub fn discover_cases(dir: &Path) -> Result<Vec<CaseFile>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut cases = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read cases dir {}", dir.display()))? {
        let entry = entry.context("read case entry")?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("toml") {
            continue;
        }
        cases.push(CaseFile::load(&path)?);
    }
    cases.sort_by(|left, right| left.case.id.cmp(&right.case.id));
    for pair in cases.windows(2) {
        if pair[0].case.id == pair[1].case.id {
            return Err(anyhow!("duplicate case.id {}", pair[0].case.id));
        }
    }
    Ok(cases)
}

fn validate_case_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        bail!("case.id must be non-empty");
    }
    if id.contains('/') || id.contains('\\') {
        bail!("case.id must not contain path separators");
    }
    if id.contains("..") {
        bail!("case.id must not contain '..'");
    }
    if !id
        .chars()
        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' || ch == '_')
    {
        bail!("case.id must use [a-z0-9_-] only");
    }
    Ok(())
}
