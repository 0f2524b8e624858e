use super::nonzero;
use crate::{
  error::{Error, Result},
  ext::CommandExt,
  options::{Options, Runtime},
  stats::Samples,
};

/// A workload script that takes `-n <iterations>` and prints the duration of
/// each iteration, in seconds, on its own line.
#[derive(Debug, Clone, Copy)]
pub struct Script {
  /// Path relative to the workload root.
  pub path: &'static str,
  /// Arguments placed before `-n`.
  pub args: &'static [&'static str],
}

pub fn parse_samples(output: &str) -> Result<Samples> {
  output
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty())
    .map(|line| {
      let sample = line
        .parse::<f64>()
        .map_err(|err| Error::MeasurementFormat(format!("sample {line:?}: {err}")))?;

      nonzero(sample, "iteration")
    })
    .collect()
}

/// Runs `script` once with `runtime` and collects one sample per iteration.
pub fn measure_script(runtime: &Runtime, script: &Script, options: &Options) -> Result<Samples> {
  let iterations = options.by_effort(100, 5, 50);

  let output = runtime
    .command()
    .args(["-E", "-O"])
    .arg(options.workload(script.path))
    .args(script.args)
    .arg("-n")
    .arg(iterations.to_string())
    .run_stdout()?;

  let samples = parse_samples(&output)?;
  if samples.len() != iterations {
    return Err(Error::MeasurementFormat(format!(
      "{} printed {} samples, expected {iterations}",
      script.path,
      samples.len()
    )));
  }

  Ok(samples)
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::testing;

  const ECHO_N: &str = r#"
while [ "$#" -gt 0 ]; do
  if [ "$1" = "-n" ]; then n="$2"; fi
  shift
done
i=0
while [ "$i" -lt "$n" ]; do
  echo 0.125
  i=$((i + 1))
done
"#;

  #[test]
  fn parses_one_sample_per_line() {
    assert_eq!(parse_samples("0.5\n0.25\n\n1.0\n").unwrap(), vec![0.5, 0.25, 1.0]);
  }

  #[test]
  fn rejects_non_numeric_lines() {
    let err = parse_samples("0.5\nTraceback (most recent call last):\n").unwrap_err();

    assert!(matches!(err, Error::MeasurementFormat(_)), "{err:?}");
  }

  #[test]
  fn rejects_zero_samples() {
    let err = parse_samples("0.5\n0.0\n").unwrap_err();

    assert!(matches!(err, Error::InvariantViolation(_)), "{err:?}");
  }

  #[test]
  fn iterations_follow_effort() {
    let dir = tempfile::tempdir().unwrap();
    let runtime = testing::fake_runtime(dir.path(), "python", ECHO_N);
    let script = Script {
      path: "performance/bm_ai.py",
      args: &[],
    };

    let fast = Options {
      fast: true,
      ..Options::default()
    };
    assert_eq!(measure_script(&runtime, &script, &fast).unwrap(), vec![0.125; 5]);
    assert_eq!(measure_script(&runtime, &script, &Options::default()).unwrap().len(), 50);
  }

  #[test]
  fn short_output_is_a_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let runtime = testing::fake_runtime(dir.path(), "python", "echo 0.5");
    let script = Script {
      path: "performance/macro_pickle.py",
      args: &["--use_cpickle", "pickle"],
    };

    let err = measure_script(&runtime, &script, &Options::default()).unwrap_err();

    assert!(matches!(err, Error::MeasurementFormat(_)), "{err:?}");
  }
}
