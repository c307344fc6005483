//! Thin wrappers over the `git` command line.
//!
//! Each function maps to exactly one `git` invocation. Work inside an
//! existing checkout is addressed with `git -C <dir>` so the process working
//! directory never changes, which matters when many workers run at once.

use std::ffi::OsStr;
use std::path::Path;

use crate::command::CommandRunner;
use crate::error::Result;

/// Message attached to stashes created before an update, so they can be
/// traced back to this tool.
pub const STASH_MESSAGE: &str = "autostashed by mass-git-clone";

const GIT: &str = "git";
const REMOTE: &str = "origin";

/// Run `git -C <dir> <args...>`.
///
/// `dir` is handed to git as-is, so checkouts below a non-UTF-8 base
/// directory work.
fn git_in(runner: &dyn CommandRunner, dir: &Path, args: &[&str]) -> Result<String> {
    let mut full: Vec<&OsStr> = Vec::with_capacity(args.len() + 2);
    full.push(OsStr::new("-C"));
    full.push(dir.as_os_str());
    full.extend(args.iter().map(OsStr::new));
    runner.run(GIT, &full)
}

/// Query `ref_name` on a remote without touching the filesystem.
pub fn ls_remote(runner: &dyn CommandRunner, url: &str, ref_name: &str) -> Result<String> {
    runner.run(
        GIT,
        &[OsStr::new("ls-remote"), OsStr::new(url), OsStr::new(ref_name)],
    )
}

/// Clone `url` into `target_dir`.
///
/// This uses the system git command, so SSH keys, credential helpers and
/// anything else configured in `~/.gitconfig` apply.
pub fn clone(runner: &dyn CommandRunner, url: &str, target_dir: &Path) -> Result<()> {
    runner.run(
        GIT,
        &[
            OsStr::new("clone"),
            OsStr::new("--quiet"),
            OsStr::new(url),
            target_dir.as_os_str(),
        ],
    )?;
    Ok(())
}

/// Stash local changes, including untracked files.
///
/// A clean working tree is not an error; git simply creates no stash.
pub fn stash(runner: &dyn CommandRunner, dir: &Path) -> Result<()> {
    git_in(
        runner,
        dir,
        &["stash", "push", "-u", "--quiet", "-m", STASH_MESSAGE],
    )?;
    Ok(())
}

/// Point `origin` at `url`.
pub fn set_remote_url(runner: &dyn CommandRunner, dir: &Path, url: &str) -> Result<()> {
    git_in(runner, dir, &["remote", "set-url", REMOTE, url])?;
    Ok(())
}

/// Ask the remote which branch its HEAD points to and record it locally.
pub fn refresh_remote_head(runner: &dyn CommandRunner, dir: &Path) -> Result<()> {
    git_in(runner, dir, &["remote", "set-head", REMOTE, "-a"])?;
    Ok(())
}

/// Read the default branch name recorded by [`refresh_remote_head`].
///
/// `symbolic-ref --short` yields `origin/<branch>`; the remote prefix is
/// dropped. Branch names containing `/` keep everything after the remote.
pub fn default_branch(runner: &dyn CommandRunner, dir: &Path) -> Result<String> {
    let head = git_in(
        runner,
        dir,
        &["symbolic-ref", "--short", "refs/remotes/origin/HEAD"],
    )?;
    Ok(strip_remote_prefix(head.trim()).to_string())
}

fn strip_remote_prefix(short_ref: &str) -> &str {
    short_ref
        .strip_prefix(REMOTE)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(short_ref)
}

/// Force-checkout `branch`, discarding local modifications to tracked files.
pub fn checkout_force(runner: &dyn CommandRunner, dir: &Path, branch: &str) -> Result<()> {
    git_in(runner, dir, &["checkout", "-f", branch])?;
    Ok(())
}

/// Fetch `branch` from `origin`.
pub fn fetch(runner: &dyn CommandRunner, dir: &Path, branch: &str) -> Result<()> {
    git_in(runner, dir, &["fetch", REMOTE, branch])?;
    Ok(())
}

/// Move the current branch to `origin/<branch>`, resetting index and tree.
pub fn reset_hard(runner: &dyn CommandRunner, dir: &Path, branch: &str) -> Result<()> {
    let target = format!("{REMOTE}/{branch}");
    git_in(runner, dir, &["reset", "--hard", &target])?;
    Ok(())
}

/// Remove untracked files and directories.
pub fn clean(runner: &dyn CommandRunner, dir: &Path) -> Result<()> {
    git_in(runner, dir, &["clean", "-f", "-d"])?;
    Ok(())
}
