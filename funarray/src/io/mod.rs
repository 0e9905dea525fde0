//! File-backed configuration for the CLI and harness.

pub mod config;
