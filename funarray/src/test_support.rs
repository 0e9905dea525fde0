//! Test-only helpers for building nested values and call arguments.

use std::path::PathBuf;

use anyhow::Result;
use serde_json::Value;
use tempfile::TempDir;

use crate::core::nested::Nested;
use crate::io::config::{FunArrayConfig, write_config};

pub fn atom<T>(value: T) -> Nested<T> {
    Nested::Atom(value)
}

pub fn list<T>(items: Vec<Nested<T>>) -> Nested<T> {
    Nested::List(items)
}

/// Split a JSON array literal into an argument tuple.
///
/// Panics if `tuple` is not an array.
pub fn args(tuple: Value) -> Vec<Value> {
    match tuple {
        Value::Array(items) => items,
        other => panic!("argument tuple must be a JSON array, got {other}"),
    }
}

/// A temp directory holding a `funarray.toml` written from `cfg`.
pub struct ConfigDir {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl ConfigDir {
    pub fn new(cfg: &FunArrayConfig) -> Result<Self> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(crate::io::config::DEFAULT_CONFIG_FILE);
        write_config(&path, cfg)?;
        Ok(Self { dir, path })
    }
}
