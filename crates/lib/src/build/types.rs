use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::process::ProcessError;
use crate::target::TargetSelection;

/// How the executables get built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
  /// Invoke `go build` directly, once per target.
  Go,
  /// Delegate to Bazel and copy its outputs into `bin/`.
  Bazel,
}

impl fmt::Display for BuildMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      BuildMode::Go => write!(f, "go"),
      BuildMode::Bazel => write!(f, "bazel"),
    }
  }
}

/// Everything a build run needs to know. Fixed before the run starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
  /// Project root. Conventional paths resolve against it and every tool runs in it.
  pub workdir: PathBuf,
  /// Vendor directory handed to source preparation.
  pub vendor_dir: Option<PathBuf>,
  /// `GOOS` override for the Go path. `None` builds for the native OS.
  pub goos: Option<String>,
  /// `GOARCH` override for the Go path. `None` builds for the native architecture.
  pub goarch: Option<String>,
  /// Where the Go path writes binaries.
  pub output_dir: PathBuf,
  /// Build with Bazel instead of `go build`.
  pub bazel: bool,
  /// Regenerate BUILD files with Gazelle before the Bazel build.
  pub gazelle: bool,
  pub targets: TargetSelection,
}

impl BuildConfig {
  pub fn mode(&self) -> BuildMode {
    if self.bazel { BuildMode::Bazel } else { BuildMode::Go }
  }

  /// Resolve a project-relative path against `workdir`.
  pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
    self.workdir.join(path)
  }
}

impl Default for BuildConfig {
  fn default() -> Self {
    Self {
      workdir: PathBuf::from("."),
      vendor_dir: None,
      goos: None,
      goarch: None,
      output_dir: PathBuf::from("bin"),
      bazel: false,
      gazelle: false,
      targets: TargetSelection::default(),
    }
  }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
  pub mode: BuildMode,
  /// Binaries written, relative to the project root, in build order.
  pub artifacts: Vec<PathBuf>,
}

/// Errors that abort a build run. None of them are recovered from.
#[derive(Debug, Error)]
pub enum BuildError {
  /// An external tool couldn't be started or exited unsuccessfully.
  #[error(transparent)]
  Process(#[from] ProcessError),

  /// Filesystem operation failed.
  #[error("io error at {}: {source}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The configured vendor directory doesn't exist.
  #[error("vendor directory not found: {}", .0.display())]
  VendorDirMissing(PathBuf),
}

impl BuildError {
  pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
    let path = path.into();
    move |source| BuildError::Io { path, source }
  }
}
