use std::{
  io::Write,
  process::{Command, ExitStatus, Output, Stdio},
};

use crate::error::{Error, Result};

#[extend::ext(name = CommandExt)]
pub impl Command {
  /// The command as it would be typed into a shell, for logs and errors.
  fn command_line(&self) -> String {
    std::iter::once(self.get_program())
      .chain(self.get_args())
      .map(|arg| arg.to_string_lossy())
      .collect::<Vec<_>>()
      .join(" ")
  }

  /// Runs the command with stdout and stderr discarded, returning an error on
  /// non-zero exit.
  fn run_quiet(&mut self) -> Result<()> {
    self.stdout(Stdio::null()).stderr(Stdio::null());
    let status = self.logged_status()?;

    if !status.success() {
      return Err(Error::ChildProcess {
        command: self.command_line(),
        status,
        stderr: String::new(),
      });
    }

    Ok(())
  }

  /// Runs the command with whatever redirection the caller configured
  /// (inherited streams by default), returning an error on non-zero exit.
  fn run_checked(&mut self) -> Result<()> {
    let status = self.logged_status()?;

    if !status.success() {
      return Err(Error::ChildProcess {
        command: self.command_line(),
        status,
        stderr: String::new(),
      });
    }

    Ok(())
  }

  /// Runs the command, capturing stdout and stderr, returning stdout. On
  /// non-zero exit the captured stderr is carried in the error; on success it
  /// is echoed to this process's stderr.
  fn run_stdout(&mut self) -> Result<String> {
    let output = self.logged_output()?;
    self.checked_stdout(output)
  }

  fn logged_status(&mut self) -> Result<ExitStatus> {
    let command = self.command_line();
    tracing::info!("Running {command}");

    self.status().map_err(|source| Error::Spawn { command, source })
  }

  fn logged_output(&mut self) -> Result<Output> {
    let command = self.command_line();
    tracing::info!("Running {command}");

    self.output().map_err(|source| Error::Spawn { command, source })
  }

  fn checked_stdout(&self, output: Output) -> Result<String> {
    if !output.status.success() {
      return Err(Error::ChildProcess {
        command: self.command_line(),
        status: output.status,
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
      });
    }

    if !output.stderr.is_empty() {
      std::io::stderr().write_all(&output.stderr)?;
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
  }
}
