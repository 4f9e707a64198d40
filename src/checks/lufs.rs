//! Loudness comparison between dry and wet renders
//!
//! Loudness here is an approximation: plain RMS in dBFS shifted by a fixed
//! -23 dB. There is no K-weighting and no gating, so values are only
//! meaningful relative to each other, never as broadcast LUFS.

use std::fmt;
use std::path::Path;

use log::debug;

use super::{status, Verdict};
use crate::analysis::stats::{linear_to_db, rms};
use crate::engine::{load_wav, AudioBuffer};
use crate::error::Result;

/// Offset added to RMS dBFS to approximate LUFS
pub const LUFS_OFFSET_DB: f64 = -23.0;

/// Maximum allowed |wet - dry| loudness difference by default
pub const DEFAULT_TOLERANCE_DB: f64 = 1.0;

/// Approximate loudness of mono samples.
///
/// Silence yields negative infinity.
pub fn approximate_lufs(samples: &[f32]) -> f64 {
    let level = rms(samples);
    if level > 0.0 {
        linear_to_db(level) + LUFS_OFFSET_DB
    } else {
        f64::NEG_INFINITY
    }
}

/// Absolute loudness difference in dB.
///
/// Two equal values (including two silent inputs) differ by exactly 0.0.
pub fn loudness_difference(a: f64, b: f64) -> f64 {
    if a == b {
        0.0
    } else {
        (a - b).abs()
    }
}

/// Loudness comparison settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LufsConfig {
    /// Maximum allowed difference in dB (inclusive)
    pub tolerance_db: f64,
}

impl Default for LufsConfig {
    fn default() -> Self {
        Self {
            tolerance_db: DEFAULT_TOLERANCE_DB,
        }
    }
}

impl LufsConfig {
    pub fn with_tolerance_db(mut self, tolerance_db: f64) -> Self {
        self.tolerance_db = tolerance_db;
        self
    }
}

/// Result of comparing a dry and a wet render
#[derive(Debug, Clone, PartialEq)]
pub struct LufsReport {
    pub dry_source: String,
    pub wet_source: String,
    pub lufs_dry: f64,
    pub lufs_wet: f64,
    pub diff_db: f64,
    pub tolerance_db: f64,
}

impl Verdict for LufsReport {
    fn passed(&self) -> bool {
        self.diff_db <= self.tolerance_db
    }

    fn check_name(&self) -> &'static str {
        "lufs"
    }
}

impl fmt::Display for LufsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "LUFS comparison (RMS approximation):")?;
        writeln!(f, "   Dry file:   {}", self.dry_source)?;
        writeln!(f, "   Wet file:   {}", self.wet_source)?;
        writeln!(f, "   LUFS dry:   {:.2} LUFS", self.lufs_dry)?;
        writeln!(f, "   LUFS wet:   {:.2} LUFS", self.lufs_wet)?;
        writeln!(f, "   Difference: {:.2} dB", self.diff_db)?;
        writeln!(f, "   Tolerance:  ±{} dB", self.tolerance_db)?;
        write!(f, "   Status:     {}", status(self.passed(), "FAIL"))?;
        if !self.passed() {
            write!(
                f,
                "\n   Warning: the difference exceeds the tolerance, the effect changes loudness too much"
            )?;
        }
        Ok(())
    }
}

/// Compare the loudness of two buffers.
///
/// Stereo buffers are downmixed to mono by averaging before measuring.
pub fn compare_loudness(
    dry: &AudioBuffer,
    wet: &AudioBuffer,
    labels: (&str, &str),
    config: &LufsConfig,
) -> LufsReport {
    let lufs_dry = approximate_lufs(&dry.to_mono());
    let lufs_wet = approximate_lufs(&wet.to_mono());
    let diff_db = loudness_difference(lufs_wet, lufs_dry);

    debug!(
        "loudness dry={:.4} wet={:.4} diff={:.4} dB",
        lufs_dry, lufs_wet, diff_db
    );

    LufsReport {
        dry_source: labels.0.to_string(),
        wet_source: labels.1.to_string(),
        lufs_dry,
        lufs_wet,
        diff_db,
        tolerance_db: config.tolerance_db,
    }
}

/// Load a dry and a wet WAV file and compare their loudness.
pub fn check_lufs_files(
    dry_path: &Path,
    wet_path: &Path,
    config: &LufsConfig,
) -> Result<LufsReport> {
    let dry = load_wav(dry_path)?;
    let wet = load_wav(wet_path)?;
    Ok(compare_loudness(
        &dry,
        &wet,
        (&dry_path.display().to_string(), &wet_path.display().to_string()),
        config,
    ))
}
