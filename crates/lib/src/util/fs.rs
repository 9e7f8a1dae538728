use std::io;
use std::path::Path;

/// Remove whatever is at `path`, recursing into directories.
///
/// A missing path is not an error.
pub fn remove_if_exists(path: &Path) -> io::Result<()> {
  match std::fs::symlink_metadata(path) {
    Ok(meta) if meta.is_dir() => std::fs::remove_dir_all(path),
    Ok(_) => std::fs::remove_file(path),
    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
    Err(e) => Err(e),
  }
}
