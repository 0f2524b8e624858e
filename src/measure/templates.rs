use std::{
  collections::BTreeMap,
  env,
  path::{Path, PathBuf},
};

use super::nonzero;
use crate::{
  error::{Error, Result},
  ext::CommandExt,
  options::{Options, Runtime},
  scope::Scope,
  stats::Samples,
};

const DJANGO_DIR: &str = "lib/django";
const SPITFIRE_DIR: &str = "lib/spitfire";
const PSYCO_SRC_DIR: &str = "lib/psyco";
const TEST_PROG: &str = "lib/spitfire/tests/perf/bigtable.py";

/// Sub-benchmarks printed by `bigtable.py`, keyed by their line prefix.
/// Spitfire is only considered at `-O4`, the setting people actually use.
/// The Django label is misspelled in the workload's output.
const SUB_BENCHMARKS: [(&str, &str); 2] = [("Spitfire", "Spitfire template -O4"), ("Django", "Djange template")];

/// Finds the line starting with `title` and returns its timing in
/// milliseconds: the second-to-last field, before the `ms` unit.
pub fn parse_template_output(output: &str, title: &str) -> Result<f64> {
  let line = output
    .lines()
    .find(|line| line.starts_with(title))
    .ok_or_else(|| Error::MeasurementFormat(format!("no {title:?} line in bigtable.py output")))?;

  let fields = line.split_whitespace().collect::<Vec<_>>();
  let number = fields
    .len()
    .checked_sub(2)
    .map(|i| fields[i])
    .ok_or_else(|| Error::MeasurementFormat(format!("no timing in {line:?}")))?;

  number
    .parse()
    .map_err(|err| Error::MeasurementFormat(format!("timing {number:?} in {line:?}: {err}")))
}

/// Whether `runtime` can already `import psyco`.
pub fn comes_with_psyco(runtime: &Runtime) -> bool {
  runtime.command().args(["-E", "-c", "import psyco"]).run_quiet().is_ok()
}

/// Builds psyco against `runtime` into a directory owned by `scope`. Putting
/// the returned directory on the module search path makes `import psyco` work.
pub fn build_psyco(runtime: &Runtime, options: &Options, scope: &mut Scope) -> Result<PathBuf> {
  tracing::info!("Building Psyco for {:?}", runtime.path());

  let build_dir = scope.temp_dir()?;
  let runtime = runtime.absolute()?;

  let mut cwd = Scope::new();
  cwd.working_directory(options.workload(PSYCO_SRC_DIR))?;
  runtime
    .command()
    .args(["setup.py", "build"])
    .arg(format!("--build-lib={}", build_dir.display()))
    .run_checked()?;

  Ok(build_dir)
}

/// Returns a psyco build directory for `runtime`, or `None` if it ships with
/// psyco.
pub fn psyco_for(runtime: &Runtime, options: &Options, scope: &mut Scope) -> Result<Option<PathBuf>> {
  if comes_with_psyco(runtime) {
    return Ok(None);
  }

  build_psyco(runtime, options, scope).map(Some)
}

/// Renders `bigtable.py` repeatedly with `runtime`, returning the samples of
/// each sub-benchmark in milliseconds.
pub fn measure_templates(
  runtime: &Runtime,
  psyco_dir: Option<&Path>,
  options: &Options,
) -> Result<BTreeMap<String, Samples>> {
  let search_path = [options.workload(SPITFIRE_DIR), options.workload(DJANGO_DIR)]
    .into_iter()
    .chain(psyco_dir.map(Path::to_path_buf));
  let python_path = env::join_paths(search_path)
    .map_err(|err| Error::InvariantViolation(format!("module search path: {err}")))?;

  let workload = || {
    let mut command = runtime.command();
    command
      .arg("-O")
      .arg(options.workload(TEST_PROG))
      .env("PYTHONPATH", &python_path);
    command
  };

  workload().run_quiet()?;

  let trials = options.by_effort(15, 6, 6);
  let mut times: BTreeMap<String, Samples> = BTreeMap::new();

  for _ in 0..trials {
    let output = workload().run_stdout()?;

    for (name, title) in SUB_BENCHMARKS {
      let elapsed = nonzero(parse_template_output(&output, title)?, title)?;
      times.entry(name.to_string()).or_default().push(elapsed);
    }
  }

  Ok(times)
}
