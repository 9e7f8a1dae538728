//! Bazel-delegated path, with optional Gazelle BUILD file regeneration.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{BuildConfig, BuildError, Builder, path_arg, remove_stale_binaries};
use crate::prepare::SourcePreparer;
use crate::process::{CommandRunner, Invocation};
use crate::target::{BAZEL_COPY_DIR, Target};

const GAZELLE: &str = "//:gazelle";

/// Dependency manifest that `update-repos` imports from.
pub const GO_MOD: &str = "go.mod";

impl<R: CommandRunner, P: SourcePreparer> Builder<R, P> {
  pub(super) fn bazel_build(&mut self, config: &BuildConfig) -> Result<Vec<PathBuf>, BuildError> {
    if config.gazelle {
      if config.resolve(GO_MOD).is_file() {
        self.exec(&update_repos(config))?;
      } else {
        debug!("no {GO_MOD} found; skipping gazelle update-repos");
      }
      self.exec(&gazelle(config))?;
    }

    let targets = config.targets.selected();
    self.exec(&bazel_build(config, &targets))?;

    let copy_dir = Path::new(BAZEL_COPY_DIR);
    remove_stale_binaries(config, copy_dir)?;

    let mut artifacts = Vec::new();
    for target in targets {
      let source = target.bazel_output();
      if !config.resolve(&source).exists() {
        warn!(executable = %target, output = %source.display(), "bazel output not found; skipping copy");
        continue;
      }

      let dest_dir = config.resolve(copy_dir);
      std::fs::create_dir_all(&dest_dir).map_err(BuildError::io(&dest_dir))?;

      let dest = target.bazel_destination();
      self.exec(&copy_file(config, &source, &dest))?;
      artifacts.push(dest);
    }

    Ok(artifacts)
  }
}

fn bazel(config: &BuildConfig) -> Invocation {
  Invocation::new("bazel").current_dir(&config.workdir)
}

/// Import Go module dependencies into the Bazel workspace.
pub fn update_repos(config: &BuildConfig) -> Invocation {
  bazel(config).args([
    "run",
    GAZELLE,
    "--",
    "update-repos",
    "--from_file=go.mod",
    "--to_macro=repos.bzl%go_repositories",
    "--build_file_generation=on",
    "--build_file_proto_mode=disable",
    "--prune",
  ])
}

/// Regenerate BUILD files from the source tree.
pub fn gazelle(config: &BuildConfig) -> Invocation {
  bazel(config).args(["run", GAZELLE])
}

/// `bazel build` over the package directories of `targets`.
pub fn bazel_build(config: &BuildConfig, targets: &[Target]) -> Invocation {
  bazel(config)
    .arg("build")
    .args(targets.iter().map(|t| path_arg(&t.package_dir())))
}

#[cfg(unix)]
fn copy_file(config: &BuildConfig, source: &Path, dest: &Path) -> Invocation {
  Invocation::new("cp")
    .arg(path_arg(source))
    .arg(path_arg(dest))
    .current_dir(&config.workdir)
}

#[cfg(windows)]
fn copy_file(config: &BuildConfig, source: &Path, dest: &Path) -> Invocation {
  Invocation::new("cmd.exe")
    .args(["/C", "copy", "/Y"])
    .arg(path_arg(source))
    .arg(path_arg(dest))
    .current_dir(&config.workdir)
}
