/// Timing samples for one runtime on one benchmark, in the unit the
/// measuring strategy uses (seconds or milliseconds).
pub type Samples = Vec<f64>;

/// Two-tailed Student's t critical values at 95% confidence for 1..=30
/// degrees of freedom.
const T_DIST_95: [f64; 30] = [
  12.706, 4.303, 3.182, 2.776, 2.571, 2.447, 2.365, 2.306, 2.262, 2.228, 2.201, 2.179, 2.160, 2.145, 2.131, 2.120,
  2.110, 2.101, 2.093, 2.086, 2.080, 2.074, 2.069, 2.064, 2.060, 2.056, 2.052, 2.048, 2.045, 2.042,
];

pub fn mean(samples: &[f64]) -> f64 {
  samples.iter().sum::<f64>() / samples.len() as f64
}

pub fn min(samples: &[f64]) -> f64 {
  samples.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Sums of squared deviations of both samples, over their combined degrees of
/// freedom.
pub fn pooled_sample_variance(a: &[f64], b: &[f64]) -> f64 {
  let deg_freedom = (a.len() + b.len()) as f64 - 2.0;
  let squares = |samples: &[f64]| {
    let mean = mean(samples);
    samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>()
  };

  (squares(a) + squares(b)) / deg_freedom
}

/// Student's two-sample t statistic for equally sized samples.
pub fn t_score(a: &[f64], b: &[f64]) -> f64 {
  let error = pooled_sample_variance(a, b) / a.len() as f64;

  (mean(a) - mean(b)) / (error * 2.0).sqrt()
}

/// Critical t value for `deg_freedom`. Beyond the table the value for the next
/// lower tabulated degrees of freedom is used, which errs towards "not
/// significant".
fn t_dist_95(deg_freedom: usize) -> f64 {
  match deg_freedom {
    0 => f64::INFINITY,
    1..=30 => T_DIST_95[deg_freedom - 1],
    31..=40 => 2.042,
    41..=60 => 2.021,
    61..=120 => 2.000,
    _ => 1.980,
  }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Significance {
  pub t_score: f64,
  pub significant: bool,
}

/// Whether the difference in means of `a` and `b` is significant at the 95%
/// confidence level. Samples without any variance give no t statistic and are
/// never significant.
pub fn is_significant(a: &[f64], b: &[f64]) -> Significance {
  let deg_freedom = (a.len() + b.len()).saturating_sub(2);
  let t_score = t_score(a, b);

  Significance {
    t_score,
    significant: t_score.is_finite() && t_score.abs() >= t_dist_95(deg_freedom),
  }
}
