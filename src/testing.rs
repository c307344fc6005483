//! Test doubles shared by the unit tests.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use crate::command::{to_owned_args, CommandRunner};
use crate::error::{Error, Result};

/// A `CommandRunner` that records every call and answers from a script.
///
/// Calls are matched by substring against the space-joined command line.
/// Failures are checked before canned responses; unmatched calls succeed
/// with empty output.
#[derive(Default)]
pub struct ScriptedRunner {
    calls: Mutex<Vec<String>>,
    raw_calls: Mutex<Vec<Vec<OsString>>>,
    responses: Vec<(String, String)>,
    failures: Vec<String>,
    create_clones: bool,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer calls containing `pattern` with `stdout`.
    pub fn respond(mut self, pattern: &str, stdout: &str) -> Self {
        self.responses.push((pattern.to_string(), stdout.to_string()));
        self
    }

    /// Fail calls containing `pattern`.
    pub fn fail_on(mut self, pattern: &str) -> Self {
        self.failures.push(pattern.to_string());
        self
    }

    /// Report `main` as every remote's default branch.
    pub fn with_default_branch(self) -> Self {
        self.respond("symbolic-ref", "origin/main\n")
    }

    /// Make successful `git clone` calls create their target directory.
    pub fn creating_clones(mut self) -> Self {
        self.create_clones = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Arguments of every call exactly as they were passed, program omitted.
    pub fn raw_calls(&self) -> Vec<Vec<OsString>> {
        self.raw_calls.lock().unwrap().clone()
    }

    pub fn calls_containing(&self, pattern: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.contains(pattern))
            .collect()
    }

    /// Only `git clone` invocations. The stash message mentions the tool
    /// name, so a bare "clone" substring would also match stashes.
    pub fn clone_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with("git clone "))
            .collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[&OsStr]) -> Result<String> {
        let line = std::iter::once(program.to_string())
            .chain(to_owned_args(args))
            .collect::<Vec<_>>()
            .join(" ");
        self.calls.lock().unwrap().push(line.clone());
        self.raw_calls
            .lock()
            .unwrap()
            .push(args.iter().map(|a| a.to_os_string()).collect());

        if self.failures.iter().any(|p| line.contains(p.as_str())) {
            return Err(Error::Command {
                program: program.to_string(),
                args: to_owned_args(args),
                status: Some(128),
                stdout: String::new(),
                stderr: format!("scripted failure: {line}"),
            });
        }

        if self.create_clones && args.first() == Some(&OsStr::new("clone")) {
            if let Some(target) = args.last() {
                fs::create_dir_all(Path::new(target))?;
            }
        }

        Ok(self
            .responses
            .iter()
            .find(|(p, _)| line.contains(p.as_str()))
            .map(|(_, out)| out.clone())
            .unwrap_or_default())
    }
}

/// A `CommandRunner` that holds every call open for a moment and remembers
/// the highest number of calls that were in flight at once.
pub struct ConcurrencyRunner {
    active: AtomicUsize,
    peak: AtomicUsize,
    hold: Duration,
}

impl ConcurrencyRunner {
    pub fn new(hold: Duration) -> Self {
        Self {
            active: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            hold,
        }
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl CommandRunner for ConcurrencyRunner {
    fn run(&self, _program: &str, _args: &[&OsStr]) -> Result<String> {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        thread::sleep(self.hold);
        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok(String::new())
    }
}
