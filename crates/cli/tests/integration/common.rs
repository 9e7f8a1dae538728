//! Shared test helpers for CLI integration tests.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Stand-in for `go`: logs its command line and cross-compile environment,
/// then writes the `-o` output. Exits 2 when its arguments contain `$FAKE_GO_FAIL`.
pub const FAKE_GO: &str = r#"#!/bin/sh
echo "go $* | CGO_ENABLED=${CGO_ENABLED-} GOOS=${GOOS-} GOARCH=${GOARCH-}" >> "$TOOL_LOG"
if [ -n "${FAKE_GO_FAIL:-}" ]; then
  case "$*" in
    *"$FAKE_GO_FAIL"*) echo "fake go: build failed" >&2; exit 2 ;;
  esac
fi
out=""
while [ $# -gt 0 ]; do
  if [ "$1" = "-o" ]; then out="$2"; fi
  shift
done
mkdir -p "$(dirname "$out")"
echo binary > "$out"
"#;

/// Stand-in for `bazel`: logs its command line; `build` writes each package's
/// output where real Bazel would put it.
pub const FAKE_BAZEL: &str = r#"#!/bin/sh
echo "bazel $*" >> "$TOOL_LOG"
if [ "$1" = "build" ]; then
  shift
  for pkg in "$@"; do
    name=$(basename "$pkg")
    mkdir -p "bazel-bin/$pkg/${name}_"
    echo binary > "bazel-bin/$pkg/${name}_/$name"
  done
fi
"#;

/// Isolated project directory with fake tools on `PATH`.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// A project with both entry points and the fake `go` and `bazel` installed.
  pub fn new() -> Self {
    let env = Self::bare();
    env.install_tool("go", FAKE_GO);
    env.install_tool("bazel", FAKE_BAZEL);
    env
  }

  /// A project with entry points but no fake tools.
  pub fn bare() -> Self {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("tools")).unwrap();
    let env = Self { temp };
    env.write_file("cmd/apiserver/main.go", "package main\n");
    env.write_file("cmd/manager/main.go", "package main\n");
    env
  }

  pub fn path(&self, relative_path: &str) -> PathBuf {
    self.temp.path().join(relative_path)
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.path(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  fn install_tool(&self, name: &str, script: &str) {
    let path = self.tools_dir().join(name);
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
  }

  fn tools_dir(&self) -> PathBuf {
    self.path("tools")
  }

  fn log_path(&self) -> PathBuf {
    self.path("tools.log")
  }

  /// Lines the fake tools logged, in invocation order.
  pub fn tool_log(&self) -> Vec<String> {
    std::fs::read_to_string(self.log_path())
      .map(|s| s.lines().map(str::to_string).collect())
      .unwrap_or_default()
  }

  /// Sorted file names directly inside `relative_dir`.
  pub fn list_dir(&self, relative_dir: &str) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(self.path(relative_dir))
      .map(|entries| {
        entries
          .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
          .collect()
      })
      .unwrap_or_default();
    names.sort();
    names
  }

  /// Get a pre-configured Command for the apiserver-boot binary.
  ///
  /// Runs in the project directory with the fake tools first on `PATH` and the
  /// Go cross-compile variables cleared.
  pub fn boot_cmd(&self) -> Command {
    self.boot_cmd_with_path(&prepend_path(&self.tools_dir()))
  }

  /// Like [`TestEnv::boot_cmd`] but with `PATH` set to exactly `path`.
  pub fn boot_cmd_with_path(&self, path: &str) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("apiserver-boot");
    cmd.current_dir(self.temp.path());
    cmd.env("PATH", path);
    cmd.env("TOOL_LOG", self.log_path());
    for var in ["RUST_LOG", "CGO_ENABLED", "GOOS", "GOARCH", "LocalAppData", "FAKE_GO_FAIL"] {
      cmd.env_remove(var);
    }
    cmd
  }

  pub fn tools_only_path(&self) -> String {
    self.tools_dir().to_string_lossy().into_owned()
  }
}

fn prepend_path(dir: &Path) -> String {
  match std::env::var("PATH") {
    Ok(path) if !path.is_empty() => format!("{}:{}", dir.display(), path),
    _ => dir.display().to_string(),
  }
}
