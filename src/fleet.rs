//! # Fleet Orchestration
//!
//! [`Fleet::mass_clone`] converges a base directory onto a repository list:
//!
//! 1. **Resolve**: reject an empty list before touching the network or the
//!    filesystem, pick the transport (probing unless one was forced), and
//!    resolve every line into a [`RepoEntry`].
//! 2. **Reconcile**: run [`reconcile`] for every entry on a rayon pool of
//!    `workers` threads. Each worker only touches its own directory, and the
//!    resolver has already guaranteed those are unique.
//! 3. **Clean up**: once the pool has drained, delete every top-level
//!    directory that no entry claims. This waits for the pool so that a clone
//!    still being written is never mistaken for a stale directory.
//! 4. **Report**: print the failing URLs and return a [`FleetReport`] whose
//!    exit code is non-zero when anything failed.
//!
//! Per-repository failures never abort the run. Configuration problems (empty
//! list, bad or duplicate directory names) and I/O errors on the base
//! directory itself do, and are returned as `Err`.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use rayon::prelude::*;

use crate::command::CommandRunner;
use crate::config::DEFAULT_PARALLELISM;
use crate::entry::{self, RepoEntry};
use crate::error::{Error, Result};
use crate::output::{emoji, prefixed_eprintln, prefixed_println, OutputConfig};
use crate::reconcile::{reconcile, ReconcileOutcome};
use crate::transport::{self, TransportMode};

/// A repository that could not be reconciled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoFailure {
    pub url: String,
    pub message: String,
}

/// Summary of a [`Fleet::mass_clone`] run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FleetReport {
    /// Number of repositories reconciled successfully.
    pub succeeded: usize,
    /// Failed repositories, in list order.
    pub failures: Vec<RepoFailure>,
    /// Names of stale directories that were removed.
    pub deleted: Vec<String>,
}

impl FleetReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Process exit status for this run.
    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

/// Reconciles a list of repositories against a base directory.
pub struct Fleet<'a> {
    runner: &'a dyn CommandRunner,
    transport: Option<TransportMode>,
    workers: usize,
    output: OutputConfig,
    status_on_stderr: bool,
}

impl<'a> Fleet<'a> {
    /// A fleet that checks SSH access to pick the transport and uses the
    /// default worker count.
    ///
    /// Output defaults to [`OutputConfig::without_color`], so the summary has
    /// no color or emoji unless [`Fleet::with_output`] is called.
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self {
            runner,
            transport: None,
            workers: DEFAULT_PARALLELISM,
            output: OutputConfig::without_color(),
            status_on_stderr: false,
        }
    }

    /// Use `transport` instead of checking SSH access.
    pub fn with_transport(mut self, transport: TransportMode) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Number of concurrent workers; values below one are raised to one.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    /// Report the detected transport on stderr, keeping stdout for data.
    pub fn with_status_on_stderr(mut self) -> Self {
        self.status_on_stderr = true;
        self
    }

    /// Resolve `raw_lines` into entries, detecting the transport if needed.
    ///
    /// An empty list fails before any network access.
    pub fn resolve_entries<S: AsRef<str>>(&self, raw_lines: &[S]) -> Result<Vec<RepoEntry>> {
        if entry::non_blank_lines(raw_lines).is_empty() {
            return Err(Error::EmptyRepoList);
        }
        let transport = match self.transport {
            Some(t) => t,
            None => {
                let detected = transport::detect(self.runner);
                if self.status_on_stderr {
                    prefixed_eprintln(detected.announcement());
                } else {
                    prefixed_println(detected.announcement());
                }
                detected
            }
        };
        entry::resolve(raw_lines, transport)
    }

    /// Converge `base_dir` onto `raw_lines`.
    pub fn mass_clone<S: AsRef<str>>(&self, base_dir: &Path, raw_lines: &[S]) -> Result<FleetReport> {
        let entries = self.resolve_entries(raw_lines)?;

        fs::create_dir_all(base_dir)?;

        let outcomes = self.reconcile_all(base_dir, &entries)?;

        let mut report = FleetReport::default();
        for outcome in outcomes {
            match outcome {
                ReconcileOutcome::Success => report.succeeded += 1,
                ReconcileOutcome::Failure { url, message } => {
                    report.failures.push(RepoFailure { url, message })
                }
            }
        }

        let expected: HashSet<&str> = entries.iter().map(|e| e.dir_name.as_str()).collect();
        let stale = find_stale_dirs(base_dir, &expected)?;
        if !stale.is_empty() {
            prefixed_println(&format!("Deleting {} stale directories", stale.len()));
            report.deleted = delete_dirs(&stale);
        }

        self.print_summary(&report);
        Ok(report)
    }

    fn reconcile_all(&self, base_dir: &Path, entries: &[RepoEntry]) -> Result<Vec<ReconcileOutcome>> {
        info!(
            "reconciling {} repositories with {} workers",
            entries.len(),
            self.workers
        );
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("mass-git-clone-{i}"))
            .build()?;

        let runner = self.runner;
        Ok(pool.install(|| {
            entries
                .par_iter()
                .map(|entry| reconcile(runner, base_dir, entry))
                .collect()
        }))
    }

    fn print_summary(&self, report: &FleetReport) {
        if report.failures.is_empty() {
            let flourish = emoji(&self.output, " 🚀", "");
            prefixed_println(&format!(
                "Done - all repositories are up-to-date{flourish}"
            ));
        } else {
            let mut message = format!("{} repo(s) failed to update", report.failures.len());
            for failure in &report.failures {
                message.push_str(&format!("\n    {}", failure.url));
            }
            prefixed_println(&message);
        }
    }
}

/// Non-hidden top-level directories of `base_dir` not named in `expected`,
/// sorted by path.
pub fn find_stale_dirs(base_dir: &Path, expected: &HashSet<&str>) -> Result<Vec<PathBuf>> {
    let mut stale = Vec::new();
    for dir_entry in fs::read_dir(base_dir)? {
        let dir_entry = dir_entry?;
        let name = dir_entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with('.') {
            continue;
        }
        let path = dir_entry.path();
        if path.is_dir() && !expected.contains(name.as_ref()) {
            stale.push(path);
        }
    }
    stale.sort();
    Ok(stale)
}

/// Remove each directory recursively and return the names removed.
///
/// A directory that cannot be removed is logged and skipped.
pub fn delete_dirs(dirs: &[PathBuf]) -> Vec<String> {
    let mut deleted = Vec::with_capacity(dirs.len());
    for dir in dirs {
        match fs::remove_dir_all(dir) {
            Ok(()) => deleted.push(
                dir.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            ),
            Err(e) => warn!("failed to delete stale directory {}: {}", dir.display(), e),
        }
    }
    deleted
}
