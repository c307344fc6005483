//! # Error Handling
//!
//! This module defines the centralized error type for `mass-git-clone`. It
//! uses `thiserror` to build a single `Error` enum covering every failure the
//! library can report, each variant carrying enough context to explain the
//! problem without a backtrace.
//!
//! Errors fall into two tiers:
//!
//! - **Configuration errors** (`EmptyRepoList`, `InvalidEntry`,
//!   `DuplicateDirectory`, `RepoList`) abort the whole run before any
//!   repository is touched.
//! - **Command errors** (`Command`) describe a single failed subprocess. The
//!   reconciler catches these at the repository boundary and turns them into
//!   a per-repository failure, so they only escape the library when they
//!   happen outside a reconcile (for example while listing remotes).
//!
//! The `Result` alias is used throughout the crate.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for mass-git-clone operations
#[derive(Error, Debug)]
pub enum Error {
    /// An external command exited unsuccessfully or could not be started.
    ///
    /// `status` is `None` when the process never ran (spawn failure) or was
    /// killed by a signal.
    #[error(
        "Status {} running {program} {args:?}\n\nstdout:\n{stdout}\n\nstderr:\n{stderr}",
        status_text(status)
    )]
    Command {
        program: String,
        args: Vec<String>,
        status: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// The repository list contained no usable lines.
    #[error("No repository URLs supplied")]
    EmptyRepoList,

    /// A line of the repository list resolved to an unusable directory name.
    #[error("Invalid entry '{line}': {message}")]
    InvalidEntry { line: String, message: String },

    /// Two entries would be checked out into the same directory.
    #[error("Entries '{first}' and '{second}' both use directory '{dir_name}'")]
    DuplicateDirectory {
        dir_name: String,
        first: String,
        second: String,
    },

    /// The repository list could not be read.
    #[error("Failed to read repository list from {}", path.display())]
    RepoList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The worker pool could not be created.
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn status_text(status: &Option<i32>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "unknown".to_string(),
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
