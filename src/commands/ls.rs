//! # Ls Command Implementation
//!
//! This module implements the `ls` subcommand, which resolves the repository
//! list and prints one `URL<TAB>DIRECTORY` line per entry.
//!
//! This command is read-only: it never touches the base directory. Unless
//! `--transport` is given it still checks SSH access, so the output shows
//! exactly the URLs a `sync` would use. The transport status line goes to
//! stderr so stdout stays machine-readable.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use mass_git_clone::command::SystemRunner;
use mass_git_clone::config;
use mass_git_clone::fleet::Fleet;

use crate::cli::TransportArg;

/// Print the resolved URL and directory for each list entry
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Repository list file. Reads stdin when omitted or `-`.
    #[arg(value_name = "LIST")]
    pub list: Option<PathBuf>,

    /// Transport for `owner/repo` shorthand entries.
    #[arg(long, value_enum, default_value_t = TransportArg::Auto)]
    pub transport: TransportArg,
}

/// Execute the `ls` command.
pub fn execute(args: LsArgs) -> Result<ExitCode> {
    let lines = config::read_repo_list(args.list.as_deref())?;

    let runner = SystemRunner;
    let mut fleet = Fleet::new(&runner).with_status_on_stderr();
    if let Some(transport) = args.transport.forced() {
        fleet = fleet.with_transport(transport);
    }

    for entry in fleet.resolve_entries(&lines)? {
        println!("{}\t{}", entry.resolved_url, entry.dir_name);
    }
    Ok(ExitCode::SUCCESS)
}
