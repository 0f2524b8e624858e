use std::time::Duration;

use nix::sys::{
  resource::{getrusage, UsageWho},
  time::TimeValLike,
};

use super::nonzero;
use crate::{
  error::Result,
  ext::CommandExt,
  options::{Options, Runtime},
  stats::Samples,
};

const TWO_TO_THREE_PROG: &str = "lib/2to3/2to3";
const TWO_TO_THREE_DIR: &str = "lib/2to3";

/// Cumulative user CPU time of all waited-for child processes.
pub trait ChildClock {
  fn child_user_time(&mut self) -> Result<Duration>;
}

/// Reads child CPU time from `getrusage(RUSAGE_CHILDREN)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Rusage;

impl ChildClock for Rusage {
  fn child_user_time(&mut self) -> Result<Duration> {
    let micros = getrusage(UsageWho::RUSAGE_CHILDREN)?.user_time().num_microseconds();

    Ok(Duration::from_micros(u64::try_from(micros).unwrap_or_default()))
  }
}

/// Measures 2to3 converting its own sources, in seconds of child CPU time.
///
/// One untimed run populates bytecode caches first. Each trial is timed by
/// reading `clock` right before and after the child runs.
pub fn measure_2to3<C: ChildClock>(runtime: &Runtime, options: &Options, clock: &mut C) -> Result<Samples> {
  let program = options.workload(TWO_TO_THREE_PROG);
  let sources = options.workload(TWO_TO_THREE_DIR);

  let warmup_target = if options.fast { &program } else { &sources };
  runtime
    .command()
    .args(["-E", "-O"])
    .arg(&program)
    .args(["-f", "all"])
    .arg(warmup_target)
    .run_quiet()?;

  let trials = options.by_effort(5, 1, 1);
  let mut times = Vec::with_capacity(trials);

  for _ in 0..trials {
    let mut command = runtime.command();
    command.args(["-E", "-O"]).arg(&program).args(["-f", "all"]).arg(&sources);

    let start = clock.child_user_time()?;
    command.run_quiet()?;
    let end = clock.child_user_time()?;

    let elapsed = end.saturating_sub(start).as_secs_f64();
    times.push(nonzero(elapsed, &command.command_line())?);
  }

  Ok(times)
}
