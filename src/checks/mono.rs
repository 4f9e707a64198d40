//! Mono-compatibility check
//!
//! A stereo file folds down to mono safely when its channels are strongly
//! correlated. The check measures the Pearson correlation of L and R.

use std::fmt;
use std::path::Path;

use log::{debug, warn};

use super::{status, Verdict};
use crate::analysis::pearson;
use crate::analysis::stats::{std_dev, to_f64};
use crate::engine::{load_wav, AudioBuffer};
use crate::error::{CheckError, Result};

/// Minimum L/R correlation for a pass
pub const MONO_THRESHOLD: f64 = 0.6;

/// Mono-compatibility settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonoConfig {
    /// Minimum correlation (inclusive) for a pass
    pub threshold: f64,
}

impl Default for MonoConfig {
    fn default() -> Self {
        Self {
            threshold: MONO_THRESHOLD,
        }
    }
}

impl MonoConfig {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Result of checking one stereo file
#[derive(Debug, Clone, PartialEq)]
pub struct MonoReport {
    /// File (or buffer label) that was checked
    pub source: String,
    /// Pearson correlation of left and right, 0.0 when either is flat
    pub correlation: f64,
    pub threshold: f64,
}

impl Verdict for MonoReport {
    fn passed(&self) -> bool {
        self.correlation >= self.threshold
    }

    fn check_name(&self) -> &'static str {
        "mono-compatibility"
    }
}

impl fmt::Display for MonoReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Results: {}", self.source)?;
        writeln!(f, "   L/R correlation: {:.3}", self.correlation)?;
        writeln!(f, "   Threshold:       >= {}", self.threshold)?;
        write!(f, "   Status:          {}", status(self.passed(), "FAIL"))?;
        if !self.passed() {
            write!(
                f,
                "\n   Warning: correlation is below the threshold, the mono fold-down may lose content"
            )?;
        }
        Ok(())
    }
}

/// Correlate the two channels of a stereo buffer.
///
/// # Errors
/// * `NotStereo` - If the buffer does not have exactly two channels
pub fn analyze_mono(buffer: &AudioBuffer, source: &str, config: &MonoConfig) -> Result<MonoReport> {
    if !buffer.is_stereo() {
        return Err(CheckError::NotStereo {
            path: source.to_string(),
            channels: buffer.channels(),
        });
    }

    let left = to_f64(&buffer.channel_samples(0));
    let right = to_f64(&buffer.channel_samples(1));
    if has_flat_channel(&left, &right) {
        warn!("{}: a channel has no variation, correlation defaults to 0.0", source);
    }
    let correlation = pearson(&left, &right);
    debug!("{}: L/R correlation {:.6}", source, correlation);

    Ok(MonoReport {
        source: source.to_string(),
        correlation,
        threshold: config.threshold,
    })
}

fn has_flat_channel(left: &[f64], right: &[f64]) -> bool {
    std_dev(left) == 0.0 || std_dev(right) == 0.0
}

/// Load a WAV file and check its mono compatibility.
pub fn check_mono_file(path: &Path, config: &MonoConfig) -> Result<MonoReport> {
    let buffer = load_wav(path)?;
    analyze_mono(&buffer, &path.display().to_string(), config)
}

/// Pass/fail tally across several files
#[derive(Debug, Clone, Default)]
pub struct MonoSummary {
    entries: Vec<(String, bool)>,
}

impl MonoSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome for one file
    pub fn record(&mut self, source: impl Into<String>, passed: bool) {
        self.entries.push((source.into(), passed));
    }

    pub fn entries(&self) -> &[(String, bool)] {
        &self.entries
    }

    /// True only if at least one file was checked and all of them passed
    pub fn all_passed(&self) -> bool {
        !self.entries.is_empty() && self.entries.iter().all(|(_, passed)| *passed)
    }
}

impl fmt::Display for MonoSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Summary:")?;
        for (source, passed) in &self.entries {
            write!(f, "\n   {}: {}", status(*passed, "FAIL"), source)?;
        }
        Ok(())
    }
}
