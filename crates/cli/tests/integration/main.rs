//! End-to-end tests driving `apiserver-boot build executables` against fake
//! `go` and `bazel` tools.

#![cfg(unix)]

mod bazel_tests;
mod common;
