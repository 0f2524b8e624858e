use std::{
  env,
  path::{Path, PathBuf},
};

use tempfile::{Builder, NamedTempFile, TempDir};

use crate::error::Result;

enum Release {
  File(NamedTempFile),
  Dir(TempDir),
  WorkingDirectory(PathBuf),
}

/// Owns temporary resources for the duration of one measurement.
///
/// Everything acquired through a `Scope` is released when it is dropped, in
/// reverse acquisition order, whether the owner returned normally, bailed out
/// with `?`, or is unwinding from a panic. Release failures are logged and
/// otherwise ignored.
#[derive(Default)]
pub struct Scope {
  releases: Vec<Release>,
}

impl Scope {
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates an empty temporary file whose name starts with `prefix`.
  pub fn temp_file(&mut self, prefix: &str) -> Result<PathBuf> {
    let file = Builder::new().prefix(prefix).tempfile()?;
    let path = file.path().to_path_buf();
    self.releases.push(Release::File(file));

    Ok(path)
  }

  /// Creates a temporary directory, removed along with its contents.
  pub fn temp_dir(&mut self) -> Result<PathBuf> {
    let dir = Builder::new().prefix("perf-compare-").tempdir()?;
    let path = dir.path().to_path_buf();
    self.releases.push(Release::Dir(dir));

    Ok(path)
  }

  /// Changes the process working directory to `path` until the scope is
  /// released.
  pub fn working_directory<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
    let former = env::current_dir()?;
    env::set_current_dir(path.as_ref())?;
    tracing::debug!("changed directory to {:?}", path.as_ref());
    self.releases.push(Release::WorkingDirectory(former));

    Ok(())
  }
}

impl Drop for Scope {
  fn drop(&mut self) {
    while let Some(release) = self.releases.pop() {
      match release {
        Release::File(file) => {
          let path = file.path().to_path_buf();
          if let Err(err) = file.close() {
            tracing::warn!("removing {path:?}: {err}");
          }
        }
        Release::Dir(dir) => {
          let path = dir.path().to_path_buf();
          if let Err(err) = dir.close() {
            tracing::debug!("removing {path:?}: {err}");
          }
        }
        Release::WorkingDirectory(former) => {
          if let Err(err) = env::set_current_dir(&former) {
            tracing::warn!("restoring working directory {former:?}: {err}");
          }
        }
      }
    }
  }
}
