//! Immutable array combinators built around a single recursion primitive.
//!
//! The crate is split the way the CLI uses it:
//!
//! - **[`core`]**: Pure, generic sequence operations. Every derived
//!   generator (`iterate`, `iterate_n`, `flatten_r`) is expressed through
//!   [`core::unfold::unfold`]. No I/O, no logging.
//! - **[`func`]** and **[`contract`]**: The JSON vocabulary. Named functions
//!   stand in for closures, and each operation carries an argument schema.
//! - **[`call`]**: Validates a JSON argument tuple, decodes it, and runs one
//!   core operation under the configured [`io::config::Limits`].
//!
//! [`curry`] offers the one-argument-at-a-time calling convention on top of
//! the fixed-arity core.

pub mod call;
pub mod contract;
pub mod core;
pub mod curry;
pub mod exit_codes;
pub mod func;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use crate::core::combinatorics::{cartesian, cartesian_n, permute};
pub use crate::core::iterate::{index, iterate, iterate_n, range, repeat, sequence};
pub use crate::core::nested::{Nested, flatten_r};
pub use crate::core::pair::{PairSplit, pop_unshift, push_shift};
pub use crate::core::prefix::{span_prefix, take_while_prefix};
pub use crate::core::unfold::unfold;
