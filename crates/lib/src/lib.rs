//! apiserver-boot-lib: building the apiserver and controller-manager executables
//!
//! This crate provides the pieces behind `apiserver-boot build executables`:
//! - `target`: the two buildable executables and the user's selection
//! - `env`: a snapshot of the ambient process environment
//! - `process`: external tool invocations and the runner that spawns them
//! - `prepare`: the source preparation step that runs before any build
//! - `build`: the `go build` and Bazel build paths

pub mod build;
pub mod env;
pub mod prepare;
pub mod process;
pub mod target;
pub mod util;
