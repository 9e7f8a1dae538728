mod build;

pub use build::{ExecutablesArgs, cmd_build_executables};
