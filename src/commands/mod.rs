//! # CLI Command Implementations
//!
//! Each subcommand of `mass-git-clone` lives in its own file with:
//! - An `Args` struct that defines the command-specific arguments, derived
//!   using `clap`.
//! - An `execute` function that takes the parsed `Args`, calls into the
//!   `mass_git_clone` library, and returns the process exit code.

pub mod ls;
pub mod sync;
