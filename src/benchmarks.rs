//! The benchmarks shipped with the tool.
//!
//! Each one measures the changed runtime first, then the baseline, and turns
//! any error into the benchmark's report text.

use crate::{
  compare::{compare, Outcome},
  error::{Error, Result},
  measure::{
    self,
    cpu_time::Rusage,
    script::{self, Script},
  },
  options::{Options, Runtime},
  registry::Registry,
  scope::Scope,
};

const DJANGO: Script = Script {
  path: "performance/bm_django.py",
  args: &[],
};
const AI: Script = Script {
  path: "performance/bm_ai.py",
  args: &[],
};
const FLOAT: Script = Script {
  path: "performance/bm_float.py",
  args: &[],
};
const PICKLE: Script = Script {
  path: "performance/macro_pickle.py",
  args: &["--use_cpickle", "pickle"],
};
const UNPICKLE: Script = Script {
  path: "performance/macro_pickle.py",
  args: &["--use_cpickle", "unpickle"],
};

/// Every built-in benchmark.
pub fn builtin() -> Registry {
  let mut registry = Registry::new();
  registry
    .register("2to3", two_to_three)
    .register("AI", ai)
    .register("Django", django)
    .register("Float", float)
    .register("Pickle", pickle)
    .register("PyBench", pybench)
    .register("Templates", templates)
    .register("Unpickle", unpickle);

  registry
}

pub fn pybench(base: &Runtime, changed: &Runtime, options: &Options) -> Outcome {
  measure::pybench::measure(base, changed, options).unwrap_or_else(Outcome::from)
}

pub fn two_to_three(base: &Runtime, changed: &Runtime, options: &Options) -> Outcome {
  try_two_to_three(base, changed, options).unwrap_or_else(Outcome::from)
}

fn try_two_to_three(base: &Runtime, changed: &Runtime, options: &Options) -> Result<Outcome> {
  let changed_times = measure::cpu_time::measure_2to3(changed, options, &mut Rusage)?;
  let base_times = measure::cpu_time::measure_2to3(base, options, &mut Rusage)?;

  compare(base_times, changed_times)
}

pub fn templates(base: &Runtime, changed: &Runtime, options: &Options) -> Outcome {
  try_templates(base, changed, options).unwrap_or_else(Outcome::from)
}

/// Psyco builds live in `scope`, so they are removed however this returns.
fn try_templates(base: &Runtime, changed: &Runtime, options: &Options) -> Result<Outcome> {
  let mut scope = Scope::new();
  let changed_psyco = measure::templates::psyco_for(changed, options, &mut scope)?;
  let base_psyco = measure::templates::psyco_for(base, options, &mut scope)?;

  let changed_times = measure::templates::measure_templates(changed, changed_psyco.as_deref(), options)?;
  let mut base_times = measure::templates::measure_templates(base, base_psyco.as_deref(), options)?;

  let groups = changed_times
    .into_iter()
    .map(|(name, changed)| {
      let base = base_times
        .remove(&name)
        .ok_or_else(|| Error::InvariantViolation(format!("baseline has no {name} samples")))?;

      Ok::<_, Error>((name, compare(base, changed)?))
    })
    .collect::<Result<Vec<_>>>()?;

  Ok(Outcome::Grouped(groups))
}

fn script_benchmark(script: &Script, base: &Runtime, changed: &Runtime, options: &Options) -> Outcome {
  let measured = script::measure_script(changed, script, options).and_then(|changed_times| {
    let base_times = script::measure_script(base, script, options)?;
    compare(base_times, changed_times)
  });

  measured.unwrap_or_else(Outcome::from)
}

pub fn django(base: &Runtime, changed: &Runtime, options: &Options) -> Outcome {
  script_benchmark(&DJANGO, base, changed, options)
}

pub fn ai(base: &Runtime, changed: &Runtime, options: &Options) -> Outcome {
  script_benchmark(&AI, base, changed, options)
}

pub fn float(base: &Runtime, changed: &Runtime, options: &Options) -> Outcome {
  script_benchmark(&FLOAT, base, changed, options)
}

pub fn pickle(base: &Runtime, changed: &Runtime, options: &Options) -> Outcome {
  script_benchmark(&PICKLE, base, changed, options)
}

pub fn unpickle(base: &Runtime, changed: &Runtime, options: &Options) -> Outcome {
  script_benchmark(&UNPICKLE, base, changed, options)
}

#[cfg(test)]
mod tests {
  use std::{env, fs, path::Path};

  use pretty_assertions::assert_eq;

  use super::*;
  use crate::testing::{self, CWD_LOCK};

  #[test]
  fn builtin_names_are_sorted() {
    assert_eq!(
      builtin().names().collect::<Vec<_>>(),
      vec!["2to3", "AI", "Django", "Float", "Pickle", "PyBench", "Templates", "Unpickle"]
    );
  }

  #[test]
  fn child_failure_becomes_report_text() {
    let dir = tempfile::tempdir().unwrap();
    let broken = testing::fake_runtime(dir.path(), "python", "echo 'ImportError: no django' >&2; exit 1");
    let options = Options {
      root: dir.path().to_path_buf(),
      ..Options::default()
    };

    let Outcome::Failure(text) = django(&broken, &broken, &options) else {
      panic!("expected failure");
    };
    assert!(text.contains("ImportError: no django"), "{text}");
  }

  #[test]
  fn templates_compare_each_sub_benchmark() {
    let dir = tempfile::tempdir().unwrap();
    let base = testing::fake_runtime(
      dir.path(),
      "base",
      r#"
case "$2" in -c) exit 0 ;; esac
echo "Spitfire template -O4    20.00 ms"
echo "Djange template          40.00 ms"
"#,
    );
    let changed = testing::fake_runtime(
      dir.path(),
      "changed",
      r#"
case "$2" in -c) exit 0 ;; esac
echo "Spitfire template -O4    10.00 ms"
echo "Djange template          50.00 ms"
"#,
    );
    let options = Options {
      root: dir.path().to_path_buf(),
      ..Options::default()
    };

    let Outcome::Grouped(groups) = templates(&base, &changed, &options) else {
      panic!("expected grouped outcome");
    };

    let names = groups.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["Django", "Spitfire"]);
    let Outcome::Multiple { min, avg, .. } = &groups[1].1 else {
      panic!("expected multiple samples");
    };
    assert_eq!((min.base, min.changed), (20.0, 10.0));
    assert_eq!((avg.base, avg.changed), (20.0, 10.0));
  }

  #[test]
  fn psyco_builds_are_removed_when_templates_fail() {
    let _lock = CWD_LOCK.lock().unwrap_or_else(|err| err.into_inner());
    let before = env::current_dir().unwrap();

    let dir = tempfile::tempdir().unwrap();
    testing::workload_file(dir.path(), "lib/psyco/setup.py", "");
    let builds = dir.path().join("builds");
    let runtime = testing::fake_runtime(
      dir.path(),
      "python",
      &format!(
        r#"
case "$1" in
  -E) exit 1 ;;
  setup.py)
    out="${{3#--build-lib=}}"
    mkdir -p "$out/psyco"
    echo "$out" >> {}
    exit 0 ;;
esac
echo 'bigtable.py: Spitfire crashed' >&2
exit 1
"#,
        builds.display()
      ),
    );
    let options = Options {
      root: dir.path().to_path_buf(),
      ..Options::default()
    };

    let Outcome::Failure(text) = templates(&runtime, &runtime, &options) else {
      panic!("expected failure");
    };
    assert!(text.contains("bigtable.py"), "{text}");

    let built = fs::read_to_string(&builds).unwrap();
    assert_eq!(built.lines().count(), 2);
    assert!(built.lines().all(|build| !Path::new(build).exists()), "{built}");
    assert_eq!(env::current_dir().unwrap(), before);
  }
}
