//! Buildable targets and the user's target selection.
//!
//! Each target carries the path conventions used by both build paths: where the
//! Go entry point lives, what the Go-built artifact is called, and where Bazel
//! puts its output.

use std::fmt;
use std::path::PathBuf;

use tracing::debug;

/// The Bazel output tree, relative to the project root.
pub const BAZEL_BIN: &str = "bazel-bin";

/// The directory Bazel artifacts are copied into, relative to the project root.
pub const BAZEL_COPY_DIR: &str = "bin";

/// One of the two executables this tool knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
  Apiserver,
  Controller,
}

impl Target {
  /// All targets, in build order.
  pub const ALL: [Target; 2] = [Target::Apiserver, Target::Controller];

  /// Look up a target by its selection name. Matching is exact.
  pub fn from_name(name: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|t| t.name() == name)
  }

  /// The name used to select this target on the command line.
  pub fn name(&self) -> &'static str {
    match self {
      Self::Apiserver => "apiserver",
      Self::Controller => "controller",
    }
  }

  /// Directory under `cmd/` holding the target's main package.
  fn package(&self) -> &'static str {
    match self {
      Self::Apiserver => "apiserver",
      Self::Controller => "manager",
    }
  }

  /// Go source entry point, e.g. `cmd/manager/main.go`.
  pub fn entry_point(&self) -> PathBuf {
    self.package_dir().join("main.go")
  }

  /// File name of the binary produced by `go build`.
  pub fn artifact_name(&self) -> &'static str {
    match self {
      Self::Apiserver => "apiserver",
      Self::Controller => "controller-manager",
    }
  }

  /// Bazel package directory, e.g. `cmd/apiserver`.
  pub fn package_dir(&self) -> PathBuf {
    PathBuf::from("cmd").join(self.package())
  }

  /// Where Bazel leaves the built binary, e.g. `bazel-bin/cmd/manager/manager_/manager`.
  pub fn bazel_output(&self) -> PathBuf {
    let pkg = self.package();
    PathBuf::from(BAZEL_BIN)
      .join(self.package_dir())
      .join(format!("{pkg}_"))
      .join(pkg)
  }

  /// Destination of the copied Bazel binary, e.g. `bin/manager`.
  pub fn bazel_destination(&self) -> PathBuf {
    PathBuf::from(BAZEL_COPY_DIR).join(self.package())
  }
}

impl fmt::Display for Target {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.name())
  }
}

/// The list of target names requested by the user.
///
/// Only membership matters: order and duplicates are irrelevant and names that
/// don't match a [`Target`] are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSelection {
  names: Vec<String>,
}

impl TargetSelection {
  pub fn new<I, S>(names: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let names: Vec<String> = names.into_iter().map(Into::into).collect();
    for name in &names {
      if Target::from_name(name).is_none() {
        debug!(target_name = %name, "ignoring unknown build target");
      }
    }
    Self { names }
  }

  /// Whether `target` was requested.
  pub fn contains(&self, target: Target) -> bool {
    self.names.iter().any(|n| n == target.name())
  }

  /// Requested targets in build order.
  pub fn selected(&self) -> Vec<Target> {
    Target::ALL.into_iter().filter(|t| self.contains(*t)).collect()
  }

  pub fn names(&self) -> &[String] {
    &self.names
  }
}

impl Default for TargetSelection {
  fn default() -> Self {
    Self::new(Target::ALL.map(|t| t.name()))
  }
}
