//! Building the apiserver and controller-manager executables.
//!
//! A [`Builder`] runs one of two linear paths, selected by [`BuildConfig::mode`]:
//!
//! - [`go`]: remove stale binaries, then `go build` each selected target with a
//!   cross-compilation environment overlay.
//! - [`bazel`]: optionally regenerate BUILD files with Gazelle, `bazel build`
//!   the selected packages, then copy the outputs into `bin/`.
//!
//! Both paths prepare sources first and stop at the first failure. Nothing is
//! retried or rolled back.

pub mod bazel;
pub mod go;
mod types;

pub use types::*;

use std::path::Path;

use tracing::{debug, info};

use crate::env::AmbientEnv;
use crate::process::{CommandRunner, Invocation};
use crate::prepare::SourcePreparer;
use crate::target::Target;
use crate::util::fs::remove_if_exists;

/// Runs builds through an injected process runner and source preparer.
pub struct Builder<R, P> {
  runner: R,
  preparer: P,
  ambient: AmbientEnv,
}

impl<R: CommandRunner, P: SourcePreparer> Builder<R, P> {
  pub fn new(runner: R, preparer: P, ambient: AmbientEnv) -> Self {
    Self {
      runner,
      preparer,
      ambient,
    }
  }

  /// Build the selected executables.
  ///
  /// Returns the first error encountered; later steps are not attempted.
  pub fn run(&mut self, config: &BuildConfig) -> Result<BuildReport, BuildError> {
    let mode = config.mode();
    info!(%mode, targets = ?config.targets.names(), "building executables");

    self.preparer.prepare(config)?;

    let artifacts = match mode {
      BuildMode::Go => self.go_build(config)?,
      BuildMode::Bazel => self.bazel_build(config)?,
    };

    Ok(BuildReport { mode, artifacts })
  }

  /// Log and run a single invocation.
  fn exec(&mut self, invocation: &Invocation) -> Result<(), BuildError> {
    info!(command = %invocation, "running");
    self.runner.run(invocation)?;
    Ok(())
  }
}

/// Delete previously built binaries from `dir`, whether or not their target is selected.
fn remove_stale_binaries(config: &BuildConfig, dir: &Path) -> Result<(), BuildError> {
  for target in Target::ALL {
    let path = config.resolve(dir.join(target.artifact_name()));
    debug!(path = %path.display(), "removing stale binary");
    remove_if_exists(&path).map_err(BuildError::io(&path))?;
  }
  Ok(())
}

/// Render a path for use as a tool argument.
fn path_arg(path: &Path) -> String {
  path.to_string_lossy().into_owned()
}
