//! Source preparation that has to happen before anything is compiled.
//!
//! Generating API code is done by a separate collaborator; the builder only
//! requires that it runs, once, before either build path touches the tree.

use tracing::debug;

use crate::build::{BuildConfig, BuildError};

/// Brings generated sources up to date before a build.
pub trait SourcePreparer {
  /// Returns an error if the sources can't be prepared; the build is aborted.
  fn prepare(&self, config: &BuildConfig) -> Result<(), BuildError>;
}

/// Checks the inputs the build depends on without generating anything.
///
/// A configured vendor directory must exist. Missing entry points are only
/// logged, since the toolchain reports them with better context.
#[derive(Debug, Default, Clone, Copy)]
pub struct CheckedSources;

impl SourcePreparer for CheckedSources {
  fn prepare(&self, config: &BuildConfig) -> Result<(), BuildError> {
    if let Some(vendor_dir) = &config.vendor_dir {
      let resolved = config.resolve(vendor_dir);
      if !resolved.is_dir() {
        return Err(BuildError::VendorDirMissing(resolved));
      }
      debug!(vendor_dir = %resolved.display(), "using vendor directory");
    }

    for target in config.targets.selected() {
      let entry = target.entry_point();
      let present = config.resolve(&entry).is_file();
      debug!(executable = %target, entry = %entry.display(), present, "checked entry point");
    }

    Ok(())
  }
}
