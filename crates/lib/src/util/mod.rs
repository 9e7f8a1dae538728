//! Shared utilities.
//!
//! Filesystem helpers used by both build paths, plus test helpers.

pub mod fs;
