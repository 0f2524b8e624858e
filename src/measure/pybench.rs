use std::{
  path::Path,
  process::Stdio,
  sync::LazyLock,
};

use regex::Regex;

use super::nonzero;
use crate::{
  compare::{Delta, Outcome},
  error::{Error, Result},
  ext::CommandExt,
  options::{Options, Runtime},
  scope::Scope,
};

const PYBENCH: &str = "performance/pybench/pybench.py";
const TOTALS_PREFIX: &str = "Totals:";

/// The summary line of `pybench -s <base> -c <changed>`. Both percentage
/// columns are skipped; they are recomputed from the raw numbers.
static TOTALS_LINE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"(?x)
    Totals:\s+(?P<min_base>\d+)ms\s+
    (?P<min_changed>\d+)ms\s+
    \S+\s+
    (?P<avg_base>\d+)ms\s+
    (?P<avg_changed>\d+)ms\s+
    \S+",
  )
  .expect("totals pattern is valid")
});

/// Minimum and average totals from a pybench comparison, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
  pub min_base: f64,
  pub min_changed: f64,
  pub avg_base: f64,
  pub avg_changed: f64,
}

impl From<Totals> for Outcome {
  fn from(totals: Totals) -> Self {
    Outcome::Totals {
      min: Delta::new(totals.min_base, totals.min_changed),
      avg: Delta::new(totals.avg_base, totals.avg_changed),
    }
  }
}

/// Parses a `Totals:` line. A zero total means pybench measured nothing.
pub fn parse_totals(line: &str) -> Result<Totals> {
  let captures = TOTALS_LINE
    .captures(line)
    .ok_or_else(|| Error::MeasurementFormat(format!("unrecognized pybench totals {line:?}")))?;

  let field = |name: &str| -> Result<f64> {
    captures[name]
      .parse::<f64>()
      .map_err(|err| Error::MeasurementFormat(format!("pybench {name}: {err}")))
      .and_then(|total| nonzero(total, "pybench totals"))
  };

  Ok(Totals {
    min_base: field("min_base")?,
    min_changed: field("min_changed")?,
    avg_base: field("avg_base")?,
    avg_changed: field("avg_changed")?,
  })
}

/// Reduces pybench's comparison report.
///
/// A report without a `Totals:` line is passed through untouched, since the
/// tool prints other diagnostics in that position. A `Totals:` line that does
/// not parse is an error.
pub fn summarize(report: &str) -> Result<Outcome> {
  match report.lines().find(|line| line.starts_with(TOTALS_PREFIX)) {
    Some(line) => Ok(parse_totals(line)?.into()),
    None => Ok(Outcome::Raw(report.to_string())),
  }
}

/// Runs pybench with `runtime`, writing its results to `dump`.
fn dump(runtime: &Runtime, options: &Options, warp: &str, dump: &Path) -> Result<()> {
  runtime
    .command()
    .args(["-E", "-O"])
    .arg(options.workload(PYBENCH))
    .args(["-w", warp, "-f"])
    .arg(dump)
    .stdout(Stdio::null())
    .run_checked()
}

/// Dumps pybench results for both runtimes and has the baseline runtime
/// compare them.
pub fn measure(base: &Runtime, changed: &Runtime, options: &Options) -> Result<Outcome> {
  let warp = options.by_effort("1", "100", "10");

  let mut scope = Scope::new();
  let base_dump = scope.temp_file("baseline.")?;
  let changed_dump = scope.temp_file("changed.")?;

  dump(changed, options, warp, &changed_dump)?;
  dump(base, options, warp, &base_dump)?;

  let report = base
    .command()
    .arg("-E")
    .arg(options.workload(PYBENCH))
    .arg("-s")
    .arg(&base_dump)
    .arg("-c")
    .arg(&changed_dump)
    .run_stdout()?;

  if options.verbose {
    return Ok(Outcome::Raw(report));
  }

  summarize(&report)
}
