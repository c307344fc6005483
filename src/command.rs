//! # External Command Execution
//!
//! Everything this crate does to a repository goes through `git` as a
//! subprocess. This module owns that boundary.
//!
//! The [`CommandRunner`] trait is the seam: the git layer only ever talks to
//! a runner, so tests can substitute a scripted implementation and exercise
//! the reconcile and fleet logic without a real `git` binary. In the
//! application, [`SystemRunner`] is used, which spawns the process, waits for
//! it, and captures both output streams.

use std::ffi::OsStr;
use std::process::Command;

use log::{debug, trace};

use crate::error::{Error, Result};

/// Trait for running external commands - allows mocking in tests
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args` and returns its standard output.
    ///
    /// Arguments are passed to the process unchanged, so paths that are not
    /// valid UTF-8 reach git byte for byte.
    ///
    /// Fails with [`Error::Command`] when the process exits with a non-zero
    /// status or cannot be started.
    fn run(&self, program: &str, args: &[&OsStr]) -> Result<String>;
}

/// Runs commands on the host with `std::process::Command`.
///
/// The child inherits the environment and working directory of this
/// process. No timeout is applied.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&OsStr]) -> Result<String> {
        debug!("running {} {}", program, display_args(args));

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| Error::Command {
                program: program.to_string(),
                args: to_owned_args(args),
                status: None,
                stdout: String::new(),
                stderr: e.to_string(),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            trace!(
                "{} {} failed\nstdout:\n{}\nstderr:\n{}",
                program,
                display_args(args),
                stdout,
                stderr
            );
            return Err(Error::Command {
                program: program.to_string(),
                args: to_owned_args(args),
                status: output.status.code(),
                stdout,
                stderr,
            });
        }

        Ok(stdout)
    }
}

/// Lossy text form of `args`, for messages only.
pub fn to_owned_args(args: &[&OsStr]) -> Vec<String> {
    args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
}

fn display_args(args: &[&OsStr]) -> String {
    to_owned_args(args).join(" ")
}
