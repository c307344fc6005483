//! # Repository List Entries
//!
//! Each non-blank line of the repository list names one repository and,
//! optionally, the directory it should be checked out into:
//!
//! ```text
//! discourse/discourse-chat-integration
//! discourse/discourse-solved  solved
//! https://gitlab.com/acme/widgets.git
//! git@example.com:foo/bar.git local-bar
//! ```
//!
//! `owner/repo` shorthand is expanded to a GitHub URL using the transport
//! chosen by [`crate::transport::detect`]. Anything else is taken to be a
//! complete URL and used as written.
//!
//! Resolution also guarantees that every directory name is usable and unique,
//! since the fleet reconciles entries concurrently and two workers sharing a
//! directory would corrupt each other's checkout.

use std::collections::HashMap;
use std::sync::OnceLock;

use log::warn;
use regex::Regex;

use crate::error::{Error, Result};
use crate::transport::TransportMode;

/// One desired repository checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoEntry {
    /// The repository token as written in the list.
    pub raw_spec: String,
    /// URL passed to git.
    pub resolved_url: String,
    /// Directory name under the base directory.
    pub dir_name: String,
}

fn shorthand_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // ASCII word characters and hyphens, exactly one slash.
        Regex::new(r"^[A-Za-z0-9_-]+/[A-Za-z0-9_-]+$").expect("shorthand pattern is valid")
    })
}

/// Whether `spec` is an `owner/repo` reference rather than a URL.
pub fn is_shorthand(spec: &str) -> bool {
    shorthand_pattern().is_match(spec)
}

/// Expand shorthand with `transport`; return other specs unchanged.
pub fn expand_url(spec: &str, transport: TransportMode) -> String {
    if is_shorthand(spec) {
        transport.github_url(spec)
    } else {
        spec.to_string()
    }
}

/// Derive a checkout directory name from a repository URL.
///
/// Takes the last path segment, ignoring trailing slashes. For scp-style
/// URLs without a path (`host:repo.git`) the part after the colon is used. A
/// trailing `.git` is removed.
pub fn dir_name_from_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    let base = match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => match trimmed.rfind(':') {
            Some(idx) => &trimmed[idx + 1..],
            None => trimmed,
        },
    };
    base.strip_suffix(".git").unwrap_or(base).to_string()
}

fn check_dir_name(name: &str) -> std::result::Result<(), String> {
    if name.is_empty() {
        return Err("directory name is empty".to_string());
    }
    if name == "." || name == ".." {
        return Err(format!("directory name must not be '{name}'"));
    }
    if name.contains(['/', '\\', '\0']) {
        return Err(format!(
            "directory name '{name}' must not contain path separators"
        ));
    }
    Ok(())
}

/// Trimmed, non-blank lines of `raw_lines`, in order.
pub fn non_blank_lines<S: AsRef<str>>(raw_lines: &[S]) -> Vec<&str> {
    raw_lines
        .iter()
        .map(|l| l.as_ref().trim())
        .filter(|l| !l.is_empty())
        .collect()
}

/// Parse a single trimmed, non-blank line.
pub fn parse_line(line: &str, transport: TransportMode) -> Result<RepoEntry> {
    let mut tokens = line.split_whitespace();
    let spec = tokens.next().ok_or_else(|| Error::InvalidEntry {
        line: line.to_string(),
        message: "line is blank".to_string(),
    })?;
    let explicit_dir = tokens.next();
    if tokens.next().is_some() {
        warn!("ignoring extra tokens in repository list line '{}'", line);
    }

    let resolved_url = expand_url(spec, transport);
    let dir_name = match explicit_dir {
        Some(dir) => dir.to_string(),
        None => dir_name_from_url(&resolved_url),
    };
    check_dir_name(&dir_name).map_err(|message| Error::InvalidEntry {
        line: line.to_string(),
        message,
    })?;

    Ok(RepoEntry {
        raw_spec: spec.to_string(),
        resolved_url,
        dir_name,
    })
}

/// Resolve every non-blank line of the repository list.
///
/// Order is preserved. Fails when there are no entries, when a line yields an
/// unusable directory name, or when two entries share a directory name.
pub fn resolve<S: AsRef<str>>(raw_lines: &[S], transport: TransportMode) -> Result<Vec<RepoEntry>> {
    let lines = non_blank_lines(raw_lines);
    if lines.is_empty() {
        return Err(Error::EmptyRepoList);
    }

    let mut seen: HashMap<String, &str> = HashMap::new();
    let mut entries = Vec::with_capacity(lines.len());
    for line in lines {
        let entry = parse_line(line, transport)?;
        if let Some(first) = seen.insert(entry.dir_name.clone(), line) {
            return Err(Error::DuplicateDirectory {
                dir_name: entry.dir_name,
                first: first.to_string(),
                second: line.to_string(),
            });
        }
        entries.push(entry);
    }
    Ok(entries)
}
