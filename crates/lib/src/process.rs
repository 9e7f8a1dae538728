//! External process invocation.
//!
//! The builder describes every tool call as an [`Invocation`] and hands it to a
//! [`CommandRunner`]. [`SystemRunner`] spawns real processes; tests swap in a
//! recording fake.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::debug;

/// Errors from running an external tool. Both variants are fatal to the build.
#[derive(Debug, Error)]
pub enum ProcessError {
  /// The tool could not be started (missing from PATH, not executable, ...).
  #[error("failed to run `{command}`: {source}")]
  Spawn {
    command: String,
    #[source]
    source: std::io::Error,
  },

  /// The tool ran and reported failure. `code` is `None` when it was killed by a signal.
  #[error("command failed with exit code {code:?}: {command}")]
  Failed { command: String, code: Option<i32> },
}

/// A single external tool call.
///
/// The child inherits the invoking process's environment and standard
/// streams; `env` only appends or overrides keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub program: String,
  pub args: Vec<String>,
  pub env: BTreeMap<String, String>,
  pub cwd: Option<PathBuf>,
}

impl Invocation {
  pub fn new(program: impl Into<String>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
      env: BTreeMap::new(),
      cwd: None,
    }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.env.insert(key.into(), value.into());
    self
  }

  pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
    self.cwd = Some(dir.as_ref().to_path_buf());
    self
  }

  /// The overlay value for `key`, if this invocation sets one.
  pub fn env_value(&self, key: &str) -> Option<&str> {
    self.env.get(key).map(String::as_str)
  }
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program)?;
    for arg in &self.args {
      write!(f, " {arg}")?;
    }
    Ok(())
  }
}

/// Runs invocations to completion, one at a time.
pub trait CommandRunner {
  /// Run `invocation`, blocking until it exits.
  ///
  /// Returns an error if the process can't be spawned or exits unsuccessfully.
  fn run(&mut self, invocation: &Invocation) -> Result<(), ProcessError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &mut R {
  fn run(&mut self, invocation: &Invocation) -> Result<(), ProcessError> {
    (**self).run(invocation)
  }
}

/// Spawns real processes with inherited standard streams, so tool output is
/// streamed live.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
  fn run(&mut self, invocation: &Invocation) -> Result<(), ProcessError> {
    let mut command = Command::new(&invocation.program);
    command
      .args(&invocation.args)
      .envs(&invocation.env)
      .stdin(Stdio::inherit())
      .stdout(Stdio::inherit())
      .stderr(Stdio::inherit());
    if let Some(dir) = &invocation.cwd {
      command.current_dir(dir);
    }

    debug!(program = %invocation.program, cwd = ?invocation.cwd, "spawning process");

    let status = command.status().map_err(|source| ProcessError::Spawn {
      command: invocation.to_string(),
      source,
    })?;

    if !status.success() {
      return Err(ProcessError::Failed {
        command: invocation.to_string(),
        code: status.code(),
      });
    }

    Ok(())
  }
}
