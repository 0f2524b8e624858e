use std::fmt;

use crate::{
  error::{Error, Result},
  stats::{self, Samples, Significance},
};

/// Describes how `new` compares to `old` as a percentage of `new`.
pub fn time_delta(old: f64, new: f64) -> String {
  let delta = ((new - old) / new) * 100.0;
  if delta > 0.0 {
    format!("{delta:.2}% slower")
  } else {
    // `+ 0.0` turns -0.0 into 0.0.
    format!("{:.2}% faster", -delta + 0.0)
  }
}

/// A baseline duration next to the changed runtime's duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delta {
  pub base: f64,
  pub changed: f64,
}

impl Delta {
  pub fn new(base: f64, changed: f64) -> Self {
    Self { base, changed }
  }

  /// Renders as `base -> changed: delta` with `precision` decimals for the
  /// durations.
  pub fn render(&self, precision: usize) -> String {
    format!(
      "{:.precision$} -> {:.precision$}: {}",
      self.base,
      self.changed,
      time_delta(self.base, self.changed)
    )
  }
}

impl fmt::Display for Delta {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.render(2))
  }
}

/// The result of one benchmark.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
  /// The benchmark could not be measured.
  Failure(String),
  /// Output passed through unparsed.
  Raw(String),
  /// One trial per runtime.
  Single(Delta),
  /// Several trials per runtime, reduced to best and typical case.
  Multiple {
    min: Delta,
    avg: Delta,
    significance: Significance,
  },
  /// Best and typical case already reduced by an external tool, in whole
  /// milliseconds.
  Totals { min: Delta, avg: Delta },
  /// Named sub-benchmarks measured by the same workload.
  Grouped(Vec<(String, Outcome)>),
}

impl From<Error> for Outcome {
  fn from(err: Error) -> Self {
    Outcome::Failure(err.to_string())
  }
}

/// Compares the samples of both runtimes.
///
/// Both sets must have the same, non-zero length. A single sample per side is
/// compared directly; otherwise the minimums and the means are compared.
pub fn compare(mut base: Samples, mut changed: Samples) -> Result<Outcome> {
  if base.len() != changed.len() {
    return Err(Error::InvariantViolation(format!(
      "comparing {} baseline samples against {} changed samples",
      base.len(),
      changed.len()
    )));
  }

  if base.is_empty() {
    return Err(Error::InvariantViolation("no samples to compare".to_string()));
  }

  if base.len() == 1 {
    return Ok(Outcome::Single(Delta::new(base[0], changed[0])));
  }

  base.sort_by(f64::total_cmp);
  changed.sort_by(f64::total_cmp);

  Ok(Outcome::Multiple {
    min: Delta::new(stats::min(&base), stats::min(&changed)),
    avg: Delta::new(stats::mean(&base), stats::mean(&changed)),
    significance: stats::is_significant(&base, &changed),
  })
}
