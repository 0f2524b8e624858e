use crate::{
  compare::Outcome,
  options::{Options, Runtime},
  registry::Registry,
};

/// Runs benchmarks against a baseline and a changed runtime.
pub struct Bench {
  baseline: Runtime,
  changed: Runtime,
  options: Options,
  /// Outcome of each benchmark, in the order they ran.
  pub outcomes: Vec<(String, Outcome)>,
}

impl Bench {
  pub fn new(baseline: Runtime, changed: Runtime, options: Options) -> Self {
    Self {
      baseline,
      changed,
      options,
      outcomes: Vec::new(),
    }
  }

  /// Runs every benchmark in `registry` one after another, in name order. A
  /// failing benchmark is recorded and the rest still run.
  pub fn bench(&mut self, registry: &Registry) {
    for (name, benchmark) in registry.iter() {
      tracing::info!("Running {name}...");

      let outcome = benchmark(&self.baseline, &self.changed, &self.options);
      if let Outcome::Failure(reason) = &outcome {
        tracing::warn!("{name} failed: {reason}");
      }

      self.outcomes.push((name.to_string(), outcome));
    }
  }
}
