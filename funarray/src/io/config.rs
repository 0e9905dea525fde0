//! Configuration stored in `funarray.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "funarray.toml";

/// Top-level configuration (TOML).
///
/// Missing fields default to the values in [`Limits::default`] and
/// [`OutputConfig::default`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FunArrayConfig {
    pub limits: Limits,
    pub output: OutputConfig,
}

/// Ceilings applied by the JSON call layer before running operations whose
/// output grows combinatorially or whose termination depends on the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Limits {
    /// Longest input accepted by `permute` (`n!` results).
    pub max_permute_len: usize,

    /// Largest result any generator may materialize.
    pub max_result_len: usize,

    /// Step budget for `unfold`/`iterate` driven by caller functions.
    pub max_unfold_steps: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON results.
    pub pretty: bool,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_permute_len: 8,
            max_result_len: 1_000_000,
            max_unfold_steps: 100_000,
        }
    }
}

impl FunArrayConfig {
    pub fn validate(&self) -> Result<()> {
        self.limits.validate()
    }
}

impl Limits {
    pub fn validate(&self) -> Result<()> {
        if self.max_permute_len == 0 {
            return Err(anyhow!("limits.max_permute_len must be > 0"));
        }
        if self.max_result_len == 0 {
            return Err(anyhow!("limits.max_result_len must be > 0"));
        }
        if self.max_unfold_steps == 0 {
            return Err(anyhow!("limits.max_unfold_steps must be > 0"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `FunArrayConfig::default()`.
pub fn load_config(path: &Path) -> Result<FunArrayConfig> {
    if !path.exists() {
        let cfg = FunArrayConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: FunArrayConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &FunArrayConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, FunArrayConfig::default());
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("nested").join("funarray.toml");
        let mut cfg = FunArrayConfig::default();
        cfg.limits.max_permute_len = 5;
        cfg.output.pretty = true;
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("funarray.toml");
        fs::write(&path, "[limits]\nmax_permute_len = 3\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.limits.max_permute_len, 3);
        assert_eq!(cfg.limits.max_result_len, Limits::default().max_result_len);
        assert!(!cfg.output.pretty);
    }

    #[test]
    fn rejects_zero_limits() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("funarray.toml");
        fs::write(&path, "[limits]\nmax_unfold_steps = 0\n").expect("write");
        let err = load_config(&path).expect_err("zero limit");
        assert!(format!("{err:#}").contains("max_unfold_steps"));
    }
}
