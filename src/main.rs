use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nix::sys::utsname;
use perf_compare::{
  bench::Bench,
  benchmarks, format,
  options::{Options, Runtime},
};

#[derive(Parser)]
struct Args {
  /// Log filter, overridden by `RUST_LOG`.
  #[arg(long, default_value = "info", global = true)]
  log: String,
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Compares the performance of `baseline` with `changed` and prints a report.
  Compare {
    /// Interpreter to compare against.
    baseline: PathBuf,
    /// Interpreter under test.
    changed: PathBuf,
    /// Spend longer running tests to get more accurate results.
    #[arg(short, long, conflicts_with = "fast")]
    rigorous: bool,
    /// Get rough answers quickly.
    #[arg(short, long)]
    fast: bool,
    /// Print more output.
    #[arg(short, long)]
    verbose: bool,
    /// Only run these benchmarks.
    #[arg(short, long, num_args = 1..)]
    benchmarks: Vec<String>,
    /// Directory containing the benchmark workloads (`lib/`, `performance/`).
    #[arg(long, default_value = ".")]
    root: PathBuf,
  },
  /// Lists the available benchmarks.
  List,
}

fn init_logging(filter: &str) {
  let filter = tracing_subscriber::EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .init();
}

fn machine() -> Result<String> {
  let uts = utsname::uname().context("uname")?;

  Ok(
    [uts.sysname(), uts.nodename(), uts.release(), uts.version(), uts.machine()]
      .map(|field| field.to_string_lossy().into_owned())
      .join(" "),
  )
}

fn main() -> Result<()> {
  let args = Args::parse();
  init_logging(&args.log);

  match args.command {
    Command::Compare {
      baseline,
      changed,
      rigorous,
      fast,
      verbose,
      benchmarks: selected,
      root,
    } => {
      let (baseline, changed) = (Runtime::new(baseline), Runtime::new(changed));
      for runtime in [&baseline, &changed] {
        if !runtime.is_bare() && !runtime.path().exists() {
          anyhow::bail!("{:?} does not exist", runtime.path());
        }
      }

      let mut registry = benchmarks::builtin();
      if !selected.is_empty() {
        registry.retain(&selected).map_err(|unknown| {
          anyhow::anyhow!(
            "unknown benchmarks {unknown:?}, expected some of {:?}",
            benchmarks::builtin().names().collect::<Vec<_>>()
          )
        })?;
      }

      let options = Options {
        rigorous,
        fast,
        verbose,
        root,
      };
      let mut bench = Bench::new(baseline, changed, options);
      bench.bench(&registry);

      let machine = machine().context("machine")?;
      println!("{}", format::format(&machine, &bench.outcomes, verbose).context("format")?);
    }
    Command::List => {
      for name in benchmarks::builtin().names() {
        println!("{name}");
      }
    }
  }

  Ok(())
}
