//! Limit merging.
//!
//! Applies case-specific overrides to the default call limits.

use anyhow::Result;
use funarray::io::config::Limits;

use crate::case::CaseLimits;

/// Apply case limit overrides to the base limits.
pub fn apply_case_limits(mut base: Limits, overrides: &CaseLimits) -> Result<Limits> {
    if let Some(max_permute_len) = overrides.max_permute_len {
        base.max_permute_len = max_permute_len;
    }
    if let Some(max_result_len) = overrides.max_result_len {
        base.max_result_len = max_result_len;
    }
    if let Some(max_unfold_steps) = overrides.max_unfold_steps {
        base.max_unfold_steps = max_unfold_steps;
    }
    base.validate()?;
    Ok(base)
}
