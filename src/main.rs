//! # mass-git-clone CLI
//!
//! This is the binary entry point for the `mass-git-clone` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging.
//! - Executing the selected command and turning its result into an exit code.
//!
//! The reconciliation logic lives in the library crate; the binary is a thin
//! wrapper around it.

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    match cli.execute() {
        Ok(code) => code,
        Err(e) => {
            eprint!(
                "{}",
                mass_git_clone::output::format_prefixed(&format!("Error: {e:#}"), None)
            );
            ExitCode::FAILURE
        }
    }
}
