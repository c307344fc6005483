//! # mass-git-clone
//!
//! This library keeps a directory of git checkouts in step with a list of
//! repositories. It powers the `mass-git-clone` command-line tool, which is
//! typically run from CI or a dev setup script to keep a fleet of plugin
//! checkouts current.
//!
//! ## Quick Example
//!
//! ```
//! use mass_git_clone::entry;
//! use mass_git_clone::transport::TransportMode;
//!
//! let lines = ["discourse/discourse", "git@example.com:foo/bar.git local-bar"];
//! let entries = entry::resolve(&lines, TransportMode::Ssh).unwrap();
//!
//! assert_eq!(entries[0].resolved_url, "git@github.com:discourse/discourse");
//! assert_eq!(entries[0].dir_name, "discourse");
//! assert_eq!(entries[1].dir_name, "local-bar");
//! ```
//!
//! ## Core Concepts
//!
//! - **Commands (`command`, `git`)**: every repository operation is a `git`
//!   subprocess behind the `CommandRunner` trait.
//! - **Transport (`transport`)**: one SSH check decides how `owner/repo`
//!   shorthand is expanded for the whole run.
//! - **Entries (`entry`)**: list lines resolved into URL and directory pairs,
//!   with unique, filesystem-safe directory names.
//! - **Reconciliation (`reconcile`)**: clone a missing checkout, or stash,
//!   reset and clean an existing one onto its remote default branch.
//! - **Fleet (`fleet`)**: reconcile every entry on a bounded thread pool,
//!   remove stale directories, and report failures.
//!
//! ## Execution Flow
//!
//! 1.  **Resolve**: read the list, detect the transport, resolve entries.
//! 2.  **Reconcile**: clone or update each entry in parallel; failures are
//!     collected per repository.
//! 3.  **Clean up**: delete directories no entry claims.
//! 4.  **Report**: list failing URLs; exit non-zero if there were any.

pub mod command;
pub mod config;
pub mod entry;
pub mod error;
pub mod fleet;
pub mod git;
pub mod output;
pub mod reconcile;
pub mod transport;

#[cfg(test)]
mod entry_proptest;
#[cfg(test)]
mod testing;
