//! Strategies that turn workload runs into timing samples.
//!
//! Every strategy measures one runtime at a time and propagates child process
//! failures. Converting failures into report text is left to the benchmark
//! procedures in [`crate::benchmarks`].

pub mod cpu_time;
pub mod pybench;
pub mod script;
pub mod templates;

use crate::error::{Error, Result};

/// Rejects zero (and negative) durations. Those mean the measurement is
/// broken, not that the workload was infinitely fast.
fn nonzero(elapsed: f64, what: &str) -> Result<f64> {
  if elapsed.is_nan() || elapsed <= 0.0 {
    return Err(Error::InvariantViolation(format!("{what} measured {elapsed}, expected a positive duration")));
  }

  Ok(elapsed)
}
