//! Direct `go build` path.

use std::path::PathBuf;

use tracing::info;

use super::{BuildConfig, BuildError, Builder, path_arg, remove_stale_binaries};
use crate::env::AmbientEnv;
use crate::prepare::SourcePreparer;
use crate::process::{CommandRunner, Invocation};
use crate::target::Target;

pub const CGO_ENABLED: &str = "CGO_ENABLED";
pub const GOOS: &str = "GOOS";
pub const GOARCH: &str = "GOARCH";
pub const GOCACHE: &str = "GOCACHE";
pub const LOCAL_APP_DATA: &str = "LocalAppData";

impl<R: CommandRunner, P: SourcePreparer> Builder<R, P> {
  pub(super) fn go_build(&mut self, config: &BuildConfig) -> Result<Vec<PathBuf>, BuildError> {
    remove_stale_binaries(config, &config.output_dir)?;

    let mut artifacts = Vec::new();
    for target in config.targets.selected() {
      let output_dir = config.resolve(&config.output_dir);
      std::fs::create_dir_all(&output_dir).map_err(BuildError::io(&output_dir))?;

      let overrides = go_env(target, config, &self.ambient);
      for (key, value) in &overrides {
        info!("{key}={value}");
      }
      self.exec(&go_command(target, config, overrides))?;

      artifacts.push(config.output_dir.join(target.artifact_name()));
    }

    Ok(artifacts)
  }
}

/// The `go build` call for `target`, with its environment overlay.
pub fn go_invocation(target: Target, config: &BuildConfig, ambient: &AmbientEnv) -> Invocation {
  go_command(target, config, go_env(target, config, ambient))
}

fn go_command(target: Target, config: &BuildConfig, overrides: Vec<(&'static str, String)>) -> Invocation {
  let output = config.output_dir.join(target.artifact_name());
  let mut invocation = Invocation::new("go")
    .args(["build", "-o"])
    .arg(path_arg(&output))
    .arg(path_arg(&target.entry_point()))
    .current_dir(&config.workdir);

  for (key, value) in overrides {
    invocation = invocation.env(key, value);
  }
  invocation
}

/// Environment overrides for building `target`, in the order they apply.
///
/// Everything not listed here is inherited from the ambient environment.
pub fn go_env(target: Target, config: &BuildConfig, ambient: &AmbientEnv) -> Vec<(&'static str, String)> {
  let mut env = Vec::new();

  // The controller honours an explicit CGO_ENABLED; the apiserver is always static.
  let keep_cgo = target == Target::Controller && ambient.non_empty(CGO_ENABLED).is_some();
  if !keep_cgo {
    env.push((CGO_ENABLED, "0".to_string()));
  }

  if let Some(goos) = config.goos.as_deref().filter(|v| !v.is_empty()) {
    env.push((GOOS, goos.to_string()));
  }
  if let Some(goarch) = config.goarch.as_deref().filter(|v| !v.is_empty()) {
    env.push((GOARCH, goarch.to_string()));
  }

  if target == Target::Controller {
    if let Some(local_app_data) = ambient.non_empty(LOCAL_APP_DATA) {
      if let Some(gocache) = ambient.non_empty(GOCACHE) {
        env.push((GOCACHE, gocache.to_string()));
      }
      env.push((LOCAL_APP_DATA, local_app_data.to_string()));
    }
  }

  env
}
