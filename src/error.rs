use std::{io, process::ExitStatus};

/// Failures raised while measuring a benchmark.
///
/// Every variant is caught at the benchmark boundary and turned into that
/// benchmark's report text, so one broken benchmark never stops the suite.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("failed to spawn `{command}`: {source}")]
  Spawn {
    command: String,
    #[source]
    source: io::Error,
  },

  /// A child process exited with a non-zero status.
  #[error("`{command}` failed ({status}){}", stderr_suffix(.stderr))]
  ChildProcess {
    command: String,
    status: ExitStatus,
    stderr: String,
  },

  /// Output that should have had a fixed structure did not.
  #[error("unexpected output format: {0}")]
  MeasurementFormat(String),

  /// The measurement setup is broken (zero durations, mismatched sample sets).
  #[error("invariant violated: {0}")]
  InvariantViolation(String),

  #[error("reading child cpu time: {0}")]
  Clock(#[from] nix::Error),

  #[error(transparent)]
  Io(#[from] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

fn stderr_suffix(stderr: &str) -> String {
  let stderr = stderr.trim_end();
  if stderr.is_empty() {
    String::new()
  } else {
    format!(": {stderr}")
  }
}
