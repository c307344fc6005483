//! CLI argument parsing and command dispatch

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use mass_git_clone::output::OutputConfig;
use mass_git_clone::transport::TransportMode;

use crate::commands;

/// mass-git-clone - Keep a directory of git checkouts in sync with a list
#[derive(Parser, Debug)]
#[command(name = "mass-git-clone")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace). Defaults to RUST_LOG,
    /// then warn.
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Clone, update and prune checkouts to match the repository list
    Sync(commands::sync::SyncArgs),

    /// Print the resolved URL and directory for each list entry
    Ls(commands::ls::LsArgs),
}

/// How shorthand `owner/repo` entries are expanded.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransportArg {
    /// Check SSH access to GitHub and fall back to HTTPS
    #[default]
    Auto,
    /// Always use SSH
    Ssh,
    /// Always use HTTPS
    Https,
}

impl TransportArg {
    /// The forced transport, or `None` when it should be detected.
    pub fn forced(self) -> Option<TransportMode> {
        match self {
            TransportArg::Auto => None,
            TransportArg::Ssh => Some(TransportMode::Ssh),
            TransportArg::Https => Some(TransportMode::Https),
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<ExitCode> {
        init_logging(self.log_level.as_deref());
        let output = OutputConfig::from_env_and_flag(&self.color);

        match self.command {
            Commands::Sync(args) => commands::sync::execute(args, output),
            Commands::Ls(args) => commands::ls::execute(args),
        }
    }
}

fn init_logging(level: Option<&str>) {
    let mut builder = match level {
        Some(level) => {
            let mut builder = env_logger::Builder::new();
            builder.parse_filters(level);
            builder
        }
        None => env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")),
    };
    // Progress lines go to stdout; keep log records on stderr.
    builder.target(env_logger::Target::Stderr);
    let _ = builder.try_init();
}
