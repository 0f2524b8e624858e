use std::fmt::Write;

use anyhow::Result;

use crate::compare::Outcome;

/// Renders a single outcome. With `verbose`, multi-sample comparisons gain a
/// line on whether the difference in means is significant.
pub fn render(outcome: &Outcome, verbose: bool) -> String {
  match outcome {
    Outcome::Failure(text) | Outcome::Raw(text) => text.trim_end().to_string(),
    Outcome::Single(delta) => delta.to_string(),
    Outcome::Totals { min, avg } => format!("Min: {}\nAvg: {}", min.render(0), avg.render(0)),
    Outcome::Multiple { min, avg, significance } => {
      let mut text = format!("Min: {min}\nAvg: {avg}");
      if verbose {
        if significance.significant {
          text.push_str(&format!(
            "\nSignificant (t={:.2}, a 95% confidence level)",
            significance.t_score
          ));
        } else {
          text.push_str("\nNot significant");
        }
      }
      text
    }
    Outcome::Grouped(groups) => groups
      .iter()
      .map(|(name, outcome)| format!("{name}:\n{}", render(outcome, verbose)))
      .collect::<Vec<_>>()
      .join("\n\n"),
  }
}

/// Formats the final report: a header naming the machine, then every
/// benchmark's outcome in the order given.
pub fn format(machine: &str, outcomes: &[(String, Outcome)], verbose: bool) -> Result<String> {
  let mut report = String::new();

  writeln!(report, "Report on {machine}")?;

  for (name, outcome) in outcomes {
    writeln!(report)?;
    writeln!(report, "{name}:")?;
    writeln!(report, "{}", render(outcome, verbose))?;
  }

  Ok(report)
}
