//! Implementation of the `apiserver-boot build executables` command.
//!
//! Builds the apiserver and controller-manager binaries, either with `go build`
//! directly or through Bazel.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::warn;

use apiserver_boot_lib::build::{BuildConfig, Builder};
use apiserver_boot_lib::env::AmbientEnv;
use apiserver_boot_lib::prepare::CheckedSources;
use apiserver_boot_lib::process::SystemRunner;
use apiserver_boot_lib::target::TargetSelection;

use crate::output::{print_stat, print_success};

#[derive(Debug, Args)]
pub struct ExecutablesArgs {
  /// Location of directory containing vendor files.
  #[arg(long)]
  pub vendor_dir: Option<PathBuf>,

  /// If specified, set this GOOS
  #[arg(long)]
  pub goos: Option<String>,

  /// If specified, set this GOARCH
  #[arg(long)]
  pub goarch: Option<String>,

  /// If set, write the binaries to this directory
  #[arg(long, default_value = "bin")]
  pub output: PathBuf,

  /// If true, use bazel to build. May require updating build rules with gazelle.
  #[arg(long)]
  pub bazel: bool,

  /// If true, run gazelle before running bazel.
  #[arg(long)]
  pub gazelle: bool,

  /// The target binaries to build
  #[arg(long, value_delimiter = ',', default_values = ["apiserver", "controller"])]
  pub targets: Vec<String>,
}

impl ExecutablesArgs {
  fn into_config(self) -> BuildConfig {
    let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());
    BuildConfig {
      vendor_dir: self.vendor_dir,
      goos: non_empty(self.goos),
      goarch: non_empty(self.goarch),
      output_dir: self.output,
      bazel: self.bazel,
      gazelle: self.gazelle,
      targets: TargetSelection::new(self.targets),
      ..BuildConfig::default()
    }
  }
}

/// Execute the build executables command.
///
/// Prints the produced binaries on success. Any tool failure aborts the whole
/// command with the failing command line as context.
pub fn cmd_build_executables(args: ExecutablesArgs) -> Result<()> {
  if args.gazelle && !args.bazel {
    warn!("--gazelle has no effect without --bazel");
  }

  let config = args.into_config();
  let mut builder = Builder::new(SystemRunner, CheckedSources, AmbientEnv::capture());
  let report = builder.run(&config).context("failed to build executables")?;

  print_success(&format!(
    "Built {} executable(s) with {}",
    report.artifacts.len(),
    report.mode
  ));
  for artifact in &report.artifacts {
    print_stat("artifact", &artifact.display().to_string());
  }

  Ok(())
}
