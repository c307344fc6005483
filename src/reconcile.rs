//! Bringing one checkout in line with its remote.
//!
//! A repository whose directory is missing is cloned. One that exists is
//! forced onto the tip of its remote's default branch:
//!
//! 1. stash local changes, untracked files included
//! 2. point `origin` at the configured URL
//! 3. refresh `origin/HEAD` and read the default branch from it
//! 4. force-checkout that branch, fetch it, hard-reset to the fetched tip
//! 5. delete untracked files and directories
//!
//! The first failing step ends the sequence for that repository. The error is
//! printed and returned as [`ReconcileOutcome::Failure`]; it is never
//! propagated, so one broken remote cannot stop the rest of the fleet. A
//! repository that fails part-way is left as the last successful step left
//! it; the next run starts over from the stash.

use std::path::Path;

use crate::command::CommandRunner;
use crate::entry::RepoEntry;
use crate::error::Result;
use crate::git;
use crate::output::prefixed_println;

/// Result of reconciling one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Success,
    Failure { url: String, message: String },
}

impl ReconcileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ReconcileOutcome::Success)
    }
}

/// Clone or update `entry` under `base_dir`.
pub fn reconcile(
    runner: &dyn CommandRunner,
    base_dir: &Path,
    entry: &RepoEntry,
) -> ReconcileOutcome {
    let dir = base_dir.join(&entry.dir_name);

    let result = if dir.is_dir() {
        prefixed_println(&format!("Updating {}...", entry.dir_name));
        update(runner, &dir, &entry.resolved_url)
    } else {
        prefixed_println(&format!("Cloning {}...", entry.dir_name));
        git::clone(runner, &entry.resolved_url, &dir)
    };

    match result {
        Ok(()) => ReconcileOutcome::Success,
        Err(e) => {
            let message = e.to_string();
            prefixed_println(&format!(
                "Error while working on {}\n\n{}",
                entry.resolved_url, message
            ));
            ReconcileOutcome::Failure {
                url: entry.resolved_url.clone(),
                message,
            }
        }
    }
}

fn update(runner: &dyn CommandRunner, dir: &Path, url: &str) -> Result<()> {
    git::stash(runner, dir)?;

    git::set_remote_url(runner, dir, url)?;
    git::refresh_remote_head(runner, dir)?;

    let branch = git::default_branch(runner, dir)?;
    log::debug!("{}: default branch is {}", dir.display(), branch);

    git::checkout_force(runner, dir, &branch)?;
    git::fetch(runner, dir, &branch)?;
    git::reset_hard(runner, dir, &branch)?;
    git::clean(runner, dir)?;
    Ok(())
}
