//! Stable exit codes for `funarray` commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Unknown operation, contract violation, bad config, or any other failure.
pub const INVALID: i32 = 1;
/// The call was well-formed but exceeded a configured limit.
pub const LIMIT: i32 = 2;
