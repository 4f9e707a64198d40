//! CLI Command Implementations
//!
//! Every check funnels through [`report_outcome`], which prints either the
//! report or the failure and reduces it to pass/fail.

use std::error::Error as _;
use std::path::{Path, PathBuf};

use colored::Colorize;
use log::{info, warn};

use crate::checks::{
    check_glide_file, check_lufs_files, check_mono_file, rule, GlideConfig, LufsConfig,
    MonoConfig, MonoSummary, Verdict,
};
use crate::engine::write_fixtures;
use crate::error::{CheckError, Result};

/// Print a check outcome and return whether it passed.
///
/// Errors count as failures; they are printed with their cause chain and a
/// recovery hint instead of aborting the process.
pub fn report_outcome<V: Verdict>(outcome: Result<V>, subject: &str) -> bool {
    match outcome {
        Ok(report) => {
            info!("{} check on {}: passed={}", report.check_name(), subject, report.passed());
            println!("\n{}", report);
            report.passed()
        }
        Err(err) => {
            print_failure(&err, subject);
            false
        }
    }
}

fn print_failure(err: &CheckError, subject: &str) {
    warn!("{} failed with {}", subject, err.error_code());
    println!("\n{} while processing {}: {}", "error".red().bold(), subject, err);
    let mut cause = err.source();
    while let Some(inner) = cause {
        println!("   caused by: {}", inner);
        cause = inner.source();
    }
    println!("   hint: {}", err.recovery_hint());
}

fn banner(title: &str) {
    println!("{}", title.bold());
    println!("{}", rule());
}

/// Run the harmonic-glide check on one file.
pub fn harmonic_glide(path: &Path, config: &GlideConfig) -> bool {
    banner("HarmonicGlide check (PsychoCore #2)");
    report_outcome(check_glide_file(path, config), &path.display().to_string())
}

/// Compare loudness of a dry and a wet render.
pub fn lufs(dry: &Path, wet: &Path, config: &LufsConfig) -> bool {
    banner("LUFS check for VOID Engine");
    let passed = report_outcome(
        check_lufs_files(dry, wet, config),
        &format!("{} / {}", dry.display(), wet.display()),
    );

    println!("\n{}", rule());
    if passed {
        println!("{}", "Check passed: loudness is preserved.".green());
    } else {
        println!("{}", "Check failed: review the Mix and Output settings.".red());
    }
    passed
}

/// Check mono compatibility of every file; passes only if all of them do.
pub fn mono(files: &[PathBuf], config: &MonoConfig) -> bool {
    banner("Mono compatibility check for VOID Engine");

    let mut summary = MonoSummary::new();
    for path in files {
        let subject = path.display().to_string();
        let passed = report_outcome(check_mono_file(path, config), &subject);
        summary.record(subject, passed);
    }

    println!("\n{}", rule());
    println!("{}", summary);
    if summary.all_passed() {
        println!("\n{}", "All checks passed: mono compatibility is fine.".green());
    } else {
        println!("\n{}", "Some checks failed: review the plugin settings.".red());
    }
    summary.all_passed()
}

/// Write the synthetic fixtures into `dir`.
pub fn create_fixtures(dir: &Path) -> Result<Vec<PathBuf>> {
    banner("Creating test WAV files");
    let written = write_fixtures(dir)?;
    for path in &written {
        println!("   {} {}", "created".green(), path.display());
    }
    println!("\nThese are simplified fixtures; real checks need files rendered by the plugin.");
    Ok(written)
}
