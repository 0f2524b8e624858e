use std::{
  path::{self, Path, PathBuf},
  process::Command,
};

use crate::error::Result;

/// An interpreter binary under comparison.
///
/// The runtime must accept `-E` and `-O`, run a script path with trailing
/// arguments, and run `-c <code>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Runtime(PathBuf);

impl Runtime {
  pub fn new<P: Into<PathBuf>>(path: P) -> Self {
    Self(path.into())
  }

  pub fn path(&self) -> &Path {
    &self.0
  }

  pub fn command(&self) -> Command {
    Command::new(&self.0)
  }

  /// Whether the runtime is a bare name such as `python`, found through `PATH`
  /// when spawned.
  pub fn is_bare(&self) -> bool {
    self.0.components().count() <= 1 && !self.0.has_root()
  }

  /// The runtime with an absolute path, so it can still be found after the
  /// working directory changes. Bare names are left for `PATH` lookup.
  pub fn absolute(&self) -> Result<Runtime> {
    if self.is_bare() {
      return Ok(self.clone());
    }

    Ok(Runtime(path::absolute(&self.0)?))
  }
}

/// How much time to spend per benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effort {
  /// More trials for more stable results.
  Rigorous,
  /// Fewer trials for rough answers.
  Fast,
  Normal,
}

#[derive(Debug, Clone)]
pub struct Options {
  pub rigorous: bool,
  pub fast: bool,
  /// Report the tools' raw output where a condensed summary would be shown.
  pub verbose: bool,
  /// Directory that workload paths are resolved against.
  pub root: PathBuf,
}

impl Default for Options {
  fn default() -> Self {
    Self {
      rigorous: false,
      fast: false,
      verbose: false,
      root: PathBuf::from("."),
    }
  }
}

impl Options {
  pub fn effort(&self) -> Effort {
    if self.rigorous {
      Effort::Rigorous
    } else if self.fast {
      Effort::Fast
    } else {
      Effort::Normal
    }
  }

  /// Picks the value for the configured effort.
  pub fn by_effort<T>(&self, rigorous: T, fast: T, normal: T) -> T {
    match self.effort() {
      Effort::Rigorous => rigorous,
      Effort::Fast => fast,
      Effort::Normal => normal,
    }
  }

  pub fn workload<P: AsRef<Path>>(&self, relative: P) -> PathBuf {
    self.root.join(relative)
  }
}
