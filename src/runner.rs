//! Execution of external commands (`git`, `tree`, `grep`).
//!
//! Commands go through the [`CommandRunner`] trait so the hook can be driven
//! without the real tools installed. Every command is attempted once and
//! waited on to completion.

use crate::report::StepReport;
use log::debug;
use std::io;
use std::path::Path;
use std::process::Command;

/// What a finished command left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was killed by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

pub trait CommandRunner {
    /// Runs `cmd[0]` with arguments `cmd[1..]` inside `dir`.
    ///
    /// Returns an error if the command can't be started at all.
    fn run(&self, dir: &Path, cmd: &[&str]) -> io::Result<CommandOutput>;
}

/// Runs commands as child processes of this one.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, dir: &Path, cmd: &[&str]) -> io::Result<CommandOutput> {
        let (program, args) = cmd
            .split_first()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty command"))?;

        let output = Command::new(program).args(args).current_dir(dir).output()?;

        let result = CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        if !result.stderr.is_empty() {
            debug!("`{}` stderr:\n{}", cmd.join(" "), result.stderr.trim_end());
        }
        Ok(result)
    }
}

/// How [`try_run`] reports problems.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Warn when the command can't be started (e.g. not installed)
    pub warn_on_error: bool,
    /// Warn with this text (plus the status code) on a non-zero exit
    pub warn_on_bad_status: Option<String>,
    /// Note printed after any kind of failure, usually a manual remedy
    pub note_on_failure: Option<String>,
    /// Record the command line before running it
    pub verbose: bool,
}

impl RunOptions {
    /// Options for commands whose failures the user must hear about.
    pub fn loud<S: Into<String>, N: Into<String>>(bad_status: S, remedy: N) -> Self {
        Self {
            warn_on_error: true,
            warn_on_bad_status: Some(bad_status.into()),
            note_on_failure: Some(remedy.into()),
            verbose: true,
        }
    }
}

/// Tries to run a command, recording problems in `report` instead of failing.
///
/// Returns the output of the command, or `None` if it couldn't be run.
pub fn try_run(
    runner: &dyn CommandRunner,
    dir: &Path,
    cmd: &[&str],
    options: &RunOptions,
    report: &mut StepReport,
) -> Option<CommandOutput> {
    let cmdline = cmd.join(" ");
    if options.verbose {
        report.info(format!("Executing: {cmdline}"));
    }
    debug!("Running `{cmdline}` in {}", dir.display());

    let (result, failed) = match runner.run(dir, cmd) {
        Err(e) => {
            debug!("`{cmdline}` could not be run: {e}");
            if options.warn_on_error {
                report.warn(format!("Failed to run `{cmdline}`: {e}"));
            }
            (None, true)
        }
        Ok(output) => {
            let failed = !output.success();
            if failed {
                if let Some(message) = &options.warn_on_bad_status {
                    let code = output
                        .status
                        .map_or_else(|| "terminated by signal".to_string(), |c| c.to_string());
                    report.warn(format!("{message} (status code: {code})"));
                }
            }
            (Some(output), failed)
        }
    };

    if failed {
        if let Some(note) = &options.note_on_failure {
            report.note(note.clone());
        }
    }

    result
}
