//! Validation checks
//!
//! Each check turns one or two audio buffers into a report. Reports carry
//! the metrics, the thresholds they were judged against and the verdict,
//! and render themselves as the human-readable text printed by the CLI.

pub mod glide;
pub mod lufs;
pub mod mono;

use std::fmt;

use colored::{ColoredString, Colorize};

pub use glide::{analyze_glide, check_glide_file, GlideConfig, GlideCorrelation, GlideReport};
pub use lufs::{approximate_lufs, check_lufs_files, compare_loudness, LufsConfig, LufsReport};
pub use mono::{analyze_mono, check_mono_file, MonoConfig, MonoReport, MonoSummary};

/// Width of the separator rules in printed reports
pub const RULE_WIDTH: usize = 60;

/// Outcome of a check, consumed uniformly by the CLI
pub trait Verdict: fmt::Display {
    /// Whether every sub-check passed
    fn passed(&self) -> bool;

    /// Short name of the check for summaries and logs
    fn check_name(&self) -> &'static str;
}

/// Coloured PASS marker, or the given failure label.
pub(crate) fn status(passed: bool, fail_label: &str) -> ColoredString {
    if passed {
        "PASS".green().bold()
    } else {
        fail_label.red().bold()
    }
}

/// Horizontal rule used between report sections
pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}
