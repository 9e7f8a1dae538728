use std::io::IsTerminal;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

mod cmd;
mod output;

use cmd::ExecutablesArgs;

const EXECUTABLES_EXAMPLES: &str = "\
Examples:
  # Generate code and build the apiserver and controller
  # binaries in the bin directory so they can be run locally.
  apiserver-boot build executables

  # Build binaries into the linux/ directory using the cross compiler for linux:amd64
  apiserver-boot build executables --goos linux --goarch amd64 --output linux/

  # Regenerate Bazel BUILD files, and then build with bazel
  # Must first install bazel and gazelle !!!
  apiserver-boot build executables --bazel --gazelle

  # Run Bazel without generating BUILD files
  apiserver-boot build executables --bazel";

/// apiserver-boot - build tooling for aggregated API servers
#[derive(Parser)]
#[command(name = "apiserver-boot")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Build the project
  Build {
    #[command(subcommand)]
    command: BuildCommands,
  },
}

#[derive(Subcommand)]
enum BuildCommands {
  /// Builds the source into executables to run on the local machine
  #[command(after_long_help = EXECUTABLES_EXAMPLES)]
  Executables(ExecutablesArgs),
}

fn main() {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let result = match cli.command {
    Commands::Build {
      command: BuildCommands::Executables(args),
    } => cmd::cmd_build_executables(args),
  };

  if let Err(err) = result {
    error!("{err:#}");
    std::process::exit(1);
  }
}

/// `RUST_LOG` takes precedence; otherwise log at info, or debug with `--verbose`.
fn init_logging(verbose: bool) {
  let default_level = if verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_ansi(std::io::stderr().is_terminal())
    .without_time()
    .init();
}
