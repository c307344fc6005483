//! Shared test utilities for integration and E2E tests.
//!
//! Tests build small "remote" repositories on local disk and point the tool
//! at their paths, so nothing here needs network access.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! #[serial]
//! fn test_example() {
//!     let Some(fixture) = GitFixture::new() else { return };
//!     let origin = fixture.origin("alpha", "main");
//!     // ... test code
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_fs::TempDir;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;
    pub use serial_test::serial;

    #[allow(unused_imports)]
    pub use super::{git, git_stdout, GitFixture, GIT_IDENTITY};
}

/// Author and committer identity used for every git call in tests.
pub const GIT_IDENTITY: [(&str, &str); 4] = [
    ("GIT_AUTHOR_NAME", "Test User"),
    ("GIT_AUTHOR_EMAIL", "test@example.com"),
    ("GIT_COMMITTER_NAME", "Test User"),
    ("GIT_COMMITTER_EMAIL", "test@example.com"),
];

/// Checks if git is available in the system
pub fn is_git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Run git in `dir` and panic with its stderr on failure.
pub fn git(dir: &Path, args: &[&str]) {
    git_stdout(dir, args);
}

/// Run git in `dir`, panic on failure, and return trimmed stdout.
pub fn git_stdout(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(["-c", "commit.gpgsign=false"])
        .args(args)
        .current_dir(dir)
        .envs(GIT_IDENTITY)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed in {}: {}",
        args,
        dir.display(),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// A temp directory holding origin repositories and a checkout base dir.
pub struct GitFixture {
    pub temp: TempDir,
}

#[allow(dead_code)]
impl GitFixture {
    /// Returns `None` (and the test should return early) when git is missing.
    ///
    /// Also exports the test identity into this process, because the library
    /// spawns git with the inherited environment and `git stash` needs one.
    /// Callers must be `#[serial]`.
    pub fn new() -> Option<Self> {
        if !is_git_available() {
            eprintln!("git not available - skipping test");
            return None;
        }
        for (key, value) in GIT_IDENTITY {
            std::env::set_var(key, value);
        }
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("remotes")).unwrap();
        Some(Self { temp })
    }

    /// Base directory for checkouts (not created).
    pub fn base_dir(&self) -> PathBuf {
        self.temp.path().join("plugins")
    }

    /// Create an origin repository with one commit on `branch`.
    pub fn origin(&self, name: &str, branch: &str) -> PathBuf {
        let path = self.temp.path().join("remotes").join(name);
        fs::create_dir(&path).unwrap();
        git(&path, &["init", "--quiet", "-b", branch]);
        self.commit(&path, "README.md", &format!("# {name}\n"), "Initial commit");
        path
    }

    /// Write `file` in `repo` and commit it.
    pub fn commit(&self, repo: &Path, file: &str, content: &str, message: &str) {
        fs::write(repo.join(file), content).unwrap();
        git(repo, &["add", file]);
        git(repo, &["commit", "--quiet", "-m", message]);
    }

    /// Repository list line for `origin` (its absolute path).
    pub fn url(origin: &Path) -> String {
        origin.to_string_lossy().into_owned()
    }

    /// Sorted names of directories in the base dir.
    pub fn checkout_dirs(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.base_dir())
            .unwrap()
            .map(|e| e.unwrap())
            .filter(|e| e.path().is_dir())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// HEAD commit of `repo`.
    pub fn head(repo: &Path) -> String {
        git_stdout(repo, &["rev-parse", "HEAD"])
    }
}
