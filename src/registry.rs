use std::collections::BTreeMap;

use crate::{
  compare::Outcome,
  options::{Options, Runtime},
};

/// A benchmark compares `(baseline, changed)` and never fails: problems are
/// reported through [`Outcome::Failure`].
pub type Benchmark = fn(&Runtime, &Runtime, &Options) -> Outcome;

/// Benchmarks by name, iterated in sorted name order.
#[derive(Default, Clone)]
pub struct Registry {
  benchmarks: BTreeMap<String, Benchmark>,
}

impl Registry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers `benchmark` under `name`, replacing any previous one.
  pub fn register(&mut self, name: &str, benchmark: Benchmark) -> &mut Self {
    self.benchmarks.insert(name.to_string(), benchmark);
    self
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.benchmarks.keys().map(String::as_str)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, Benchmark)> {
    self.benchmarks.iter().map(|(name, benchmark)| (name.as_str(), *benchmark))
  }

  /// Keeps only the benchmarks in `names`. Returns the names that are not
  /// registered as the error.
  pub fn retain(&mut self, names: &[String]) -> Result<(), Vec<String>> {
    let unknown = names
      .iter()
      .filter(|name| !self.benchmarks.contains_key(name.as_str()))
      .cloned()
      .collect::<Vec<_>>();

    if !unknown.is_empty() {
      return Err(unknown);
    }

    self.benchmarks.retain(|name, _| names.contains(name));

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  fn noop(_: &Runtime, _: &Runtime, _: &Options) -> Outcome {
    Outcome::Raw(String::new())
  }

  #[test]
  fn iterates_in_sorted_order() {
    let mut registry = Registry::new();
    registry
      .register("Templates", noop)
      .register("2to3", noop)
      .register("PyBench", noop);

    assert_eq!(registry.names().collect::<Vec<_>>(), vec!["2to3", "PyBench", "Templates"]);
  }

  #[test]
  fn retain_selects_a_subset() {
    let mut registry = Registry::new();
    registry.register("Django", noop).register("AI", noop).register("Float", noop);

    registry.retain(&["Float".to_string(), "AI".to_string()]).unwrap();

    assert_eq!(registry.names().collect::<Vec<_>>(), vec!["AI", "Float"]);
  }

  #[test]
  fn retain_reports_unknown_names() {
    let mut registry = Registry::new();
    registry.register("Django", noop);

    let unknown = registry.retain(&["Django".to_string(), "Richards".to_string()]).unwrap_err();

    assert_eq!(unknown, vec!["Richards".to_string()]);
    assert_eq!(registry.names().count(), 1);
  }
}
