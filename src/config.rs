//! # Configuration
//!
//! Run configuration comes from three places: command-line flags, the
//! `PARALLEL` environment variable, and the repository list itself, which is
//! read from a file or from standard input.
//!
//! The worker count is resolved leniently. A value that is missing, not a
//! number, or zero falls back to [`DEFAULT_PARALLELISM`] instead of failing
//! the run, so a stray `PARALLEL=` in a CI environment is harmless.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Worker threads used when nothing else is configured.
pub const DEFAULT_PARALLELISM: usize = 10;

/// Environment variable overriding the worker count.
pub const PARALLEL_ENV: &str = "PARALLEL";

/// List argument meaning "read from standard input".
pub const STDIN_MARKER: &str = "-";

/// Parse a worker count, falling back to [`DEFAULT_PARALLELISM`].
pub fn parse_parallelism(value: Option<&str>) -> usize {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_PARALLELISM)
}

/// Worker count from `--parallel`, else `PARALLEL`, else the default.
pub fn parallelism(flag: Option<usize>) -> usize {
    match flag.filter(|&n| n > 0) {
        Some(n) => n,
        None => parse_parallelism(std::env::var(PARALLEL_ENV).ok().as_deref()),
    }
}

/// Collect every line of `reader`.
pub fn read_lines<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    reader.lines().collect()
}

/// Read the repository list from `source`, or stdin when it is `None` or `-`.
pub fn read_repo_list(source: Option<&Path>) -> Result<Vec<String>> {
    match source {
        Some(path) if path != Path::new(STDIN_MARKER) => {
            let file = File::open(path).map_err(|source| Error::RepoList {
                path: path.to_path_buf(),
                source,
            })?;
            read_lines(BufReader::new(file)).map_err(|source| Error::RepoList {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => read_lines(io::stdin().lock()).map_err(|source| Error::RepoList {
            path: PathBuf::from("<stdin>"),
            source,
        }),
    }
}
