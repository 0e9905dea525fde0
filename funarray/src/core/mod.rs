//! Deterministic, pure sequence operations.
//!
//! Core modules never perform I/O or logging. Inputs are borrowed and every
//! operation returns a freshly owned result, so any function here can be
//! called concurrently without coordination.

pub mod combinatorics;
pub mod iterate;
pub mod nested;
pub mod pair;
pub mod prefix;
pub mod primitives;
pub mod unfold;
