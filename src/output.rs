//! # Output Configuration
//!
//! This module controls how progress is written to the console.
//!
//! ## Tagged lines
//!
//! Reconciliation runs on many worker threads at once, so their output
//! interleaves. Every line is prefixed with `[mass-git-clone]`, and lines
//! written from a pool worker also carry `[t<N>]` with the worker index.
//! A multi-line message is prefixed line by line and written with a single
//! locked write, so lines of one message are never split by another worker.
//!
//! ## Respecting User Preferences
//!
//! Emoji are only used when color output is enabled. The following are
//! respected:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals

use std::env;
use std::io::Write;

/// Tag at the start of every console line.
pub const TAG: &str = "[mass-git-clone]";

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// # Arguments
    /// * `color_flag` - The value of the --color CLI flag: "always", "never", or "auto"
    ///
    /// In auto mode, colors are disabled if:
    /// - `NO_COLOR` environment variable is set (any value, including empty)
    /// - `CLICOLOR=0` is set
    /// - `TERM=dumb` is set
    /// - stdout is not a TTY (unless `CLICOLOR_FORCE=1`)
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of the variable (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Create a configuration with colors always enabled.
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns `emoji_str` when colors are enabled, `plain` otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// Line prefix for output from `worker`, or from outside the pool.
pub fn prefix(worker: Option<usize>) -> String {
    match worker {
        Some(n) => format!("{TAG}[t{n}]"),
        None => TAG.to_string(),
    }
}

/// Prefix every line of `message`. The result ends with a newline.
pub fn format_prefixed(message: &str, worker: Option<usize>) -> String {
    let prefix = prefix(worker);
    let mut out = String::new();
    let mut lines = message.lines().peekable();
    if lines.peek().is_none() {
        out.push_str(&prefix);
        out.push('\n');
        return out;
    }
    for line in lines {
        out.push_str(&prefix);
        if !line.is_empty() {
            out.push(' ');
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}

/// Print `message` to stdout, tagged with the current rayon worker if any.
pub fn prefixed_println(message: &str) {
    let text = format_prefixed(message, rayon::current_thread_index());
    let mut stdout = std::io::stdout().lock();
    // A closed stdout must not abort reconciliation.
    let _ = stdout.write_all(text.as_bytes());
    let _ = stdout.flush();
}

/// Like [`prefixed_println`], but to stderr. Used when stdout carries data.
pub fn prefixed_eprintln(message: &str) {
    let text = format_prefixed(message, rayon::current_thread_index());
    let _ = std::io::stderr().lock().write_all(text.as_bytes());
}
