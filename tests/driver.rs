use std::{fs, os::unix::fs::PermissionsExt, path::Path};

use perf_compare::{
  bench::Bench,
  benchmarks,
  compare::Outcome,
  format,
  options::{Options, Runtime},
};
use pretty_assertions::assert_eq;

fn fake_runtime(dir: &Path, name: &str, body: &str) -> Runtime {
  let path = dir.join(name);
  fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
  fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

  Runtime::new(path)
}

#[test]
fn broken_runtime_fails_every_benchmark_without_aborting() {
  let dir = tempfile::tempdir().unwrap();
  let broken = fake_runtime(dir.path(), "python", "echo 'Segmentation fault' >&2; exit 139");
  let options = Options {
    root: dir.path().to_path_buf(),
    ..Options::default()
  };

  let mut registry = benchmarks::builtin();
  registry
    .retain(&["Templates".to_string(), "2to3".to_string(), "Django".to_string()])
    .unwrap();

  let mut bench = Bench::new(broken.clone(), broken, options);
  bench.bench(&registry);

  let names = bench.outcomes.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>();
  assert_eq!(names, vec!["2to3", "Django", "Templates"]);
  for (name, outcome) in &bench.outcomes {
    assert!(matches!(outcome, Outcome::Failure(_)), "{name}: {outcome:?}");
  }
}

#[test]
fn pybench_report_end_to_end() {
  let dir = tempfile::tempdir().unwrap();
  let body = r#"
for arg in "$@"; do
  if [ "$arg" = "-s" ]; then
    echo "Totals:    1000ms    900ms   -10.0%    1100ms    1000ms    -9.1%"
    exit 0
  fi
done
"#;
  let base = fake_runtime(dir.path(), "base", body);
  let changed = fake_runtime(dir.path(), "changed", body);
  let options = Options {
    root: dir.path().to_path_buf(),
    ..Options::default()
  };

  let mut registry = benchmarks::builtin();
  registry.retain(&["PyBench".to_string()]).unwrap();

  let mut bench = Bench::new(base, changed, options);
  bench.bench(&registry);

  assert_eq!(
    format::format("test-machine", &bench.outcomes, false).unwrap(),
    "Report on test-machine\n\nPyBench:\nMin: 1000 -> 900: 11.11% faster\nAvg: 1100 -> 1000: 10.00% faster\n"
  );
}
