//! Transport selection for shorthand repository references.
//!
//! Shorthand `owner/repo` entries can be cloned over SSH or HTTPS. Which one
//! works depends on the machine: developer laptops usually have an SSH key
//! registered with GitHub, CI runners usually do not. The decision is made
//! once, up front, by listing a public repository over SSH, and the result is
//! handed to the resolver as a plain value. Reporting the choice is left to
//! the caller, which knows whether stdout is reserved for data.

use std::fmt;

use crate::command::CommandRunner;
use crate::git;

/// Repository listed to decide whether SSH access to GitHub works.
pub const SSH_CHECK_URL: &str = "git@github.com:discourse/discourse";

/// Ref requested from [`SSH_CHECK_URL`].
pub const SSH_CHECK_REF: &str = "main";

/// How shorthand references are turned into clone URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    /// `git@github.com:owner/repo`
    Ssh,
    /// `https://github.com/owner/repo`
    Https,
}

impl TransportMode {
    /// Build the full GitHub URL for `owner/repo`.
    pub fn github_url(self, owner_repo: &str) -> String {
        match self {
            TransportMode::Ssh => format!("git@github.com:{owner_repo}"),
            TransportMode::Https => format!("https://github.com/{owner_repo}"),
        }
    }

    /// Status line shown after [`detect`] picked this mode.
    pub fn announcement(self) -> &'static str {
        match self {
            TransportMode::Ssh => "Using SSH for GitHub...",
            TransportMode::Https => "SSH failed. Using https for GitHub...",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportMode::Ssh => write!(f, "ssh"),
            TransportMode::Https => write!(f, "https"),
        }
    }
}

/// Decide between SSH and HTTPS with a single `git ls-remote`.
///
/// Any failure (missing key, no network, unknown host) selects HTTPS.
pub fn detect(runner: &dyn CommandRunner) -> TransportMode {
    match git::ls_remote(runner, SSH_CHECK_URL, SSH_CHECK_REF) {
        Ok(_) => TransportMode::Ssh,
        Err(e) => {
            log::debug!("SSH check failed: {}", e);
            TransportMode::Https
        }
    }
}
