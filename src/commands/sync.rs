//! # Sync Command Implementation
//!
//! This module implements the `sync` subcommand, the main job of the tool.
//!
//! ## Functionality
//!
//! - **Clone**: repositories whose directory is missing are cloned.
//! - **Update**: existing checkouts have local changes stashed and are hard
//!   reset to the tip of their remote's default branch.
//! - **Prune**: directories under the base directory that no entry claims are
//!   deleted once every repository has been processed.
//!
//! Repositories are processed concurrently. The worker count comes from
//! `--parallel`, then the `PARALLEL` environment variable, then defaults to 10.
//! The command exits with status 1 if any repository failed.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;

use mass_git_clone::command::SystemRunner;
use mass_git_clone::config;
use mass_git_clone::fleet::Fleet;
use mass_git_clone::output::OutputConfig;

use crate::cli::TransportArg;

/// Clone, update and prune checkouts to match the repository list
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Directory holding one checkout per repository. Created if missing.
    #[arg(value_name = "BASE_DIR")]
    pub base_dir: PathBuf,

    /// Repository list file, one entry per line. Reads stdin when omitted
    /// or `-`.
    #[arg(value_name = "LIST")]
    pub list: Option<PathBuf>,

    /// Number of repositories processed at once.
    ///
    /// Falls back to the `PARALLEL` environment variable, then 10.
    #[arg(short = 'j', long, value_name = "N")]
    pub parallel: Option<usize>,

    /// Transport for `owner/repo` shorthand entries.
    #[arg(long, value_enum, default_value_t = TransportArg::Auto)]
    pub transport: TransportArg,
}

/// Execute the `sync` command.
pub fn execute(args: SyncArgs, output: OutputConfig) -> Result<ExitCode> {
    let lines = config::read_repo_list(args.list.as_deref())?;
    let workers = config::parallelism(args.parallel);

    let runner = SystemRunner;
    let mut fleet = Fleet::new(&runner).with_workers(workers).with_output(output);
    if let Some(transport) = args.transport.forced() {
        fleet = fleet.with_transport(transport);
    }

    let report = fleet
        .mass_clone(&args.base_dir, &lines)
        .with_context(|| format!("Failed to sync {}", args.base_dir.display()))?;

    Ok(ExitCode::from(report.exit_code()))
}
