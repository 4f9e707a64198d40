//! Harmonic-glide verification
//!
//! HarmonicGlide nudges pitch up by a few cents as loudness rises. The
//! check recovers both contours from a rendered file and verifies that
//! they move together, that the pitch contour is smooth, and that its
//! excursion stays within the design range.
//!
//! Pipeline:
//! 1. RMS envelope over 10 ms windows, then its first difference
//! 2. Pitch-shift series over 50 ms windows
//! 3. Warm-up discard, then truncation to a common length
//! 4. Correlation, smoothness and range sub-checks

use std::fmt;
use std::path::Path;

use log::{debug, warn};

use super::{rule, status, Verdict};
use crate::analysis::stats::{diff, max_abs, min_max, std_dev};
use crate::analysis::{pearson, pitch_shift_series, rms_envelope, PITCH_WINDOW_MS, RMS_WINDOW_MS};
use crate::engine::{load_wav, AudioBuffer};
use crate::error::Result;

/// Windows dropped from the start of each series while the effect settles
pub const WARMUP_WINDOWS: usize = 5;

/// The pitch series must be longer than this before warm-up is dropped
const WARMUP_MIN_PITCH_POINTS: usize = 10;

/// Minimum RMS-to-pitch correlation (exclusive)
pub const DEFAULT_MIN_CORRELATION: f64 = 0.1;

/// Maximum change between neighbouring pitch windows (exclusive, cents)
pub const DEFAULT_SMOOTHNESS_CENTS: f64 = 5.0;

/// Nominal design range of the shift in cents
pub const NOMINAL_SHIFT_CENTS: (f64, f64) = (2.0, 3.0);

/// Lower bound of the accepted maximum shift (cents)
pub const DEFAULT_MIN_SHIFT_CENTS: f64 = NOMINAL_SHIFT_CENTS.0;

/// Upper bound of the accepted maximum shift (cents): the nominal maximum
/// doubled to tolerate estimator outliers
pub const DEFAULT_MAX_SHIFT_CENTS: f64 = NOMINAL_SHIFT_CENTS.1 * 2.0;

/// Harmonic-glide thresholds and window sizes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlideConfig {
    pub rms_window_ms: f64,
    pub pitch_window_ms: f64,
    pub min_correlation: f64,
    pub smoothness_cents: f64,
    pub min_shift_cents: f64,
    pub max_shift_cents: f64,
}

impl Default for GlideConfig {
    fn default() -> Self {
        Self {
            rms_window_ms: RMS_WINDOW_MS,
            pitch_window_ms: PITCH_WINDOW_MS,
            min_correlation: DEFAULT_MIN_CORRELATION,
            smoothness_cents: DEFAULT_SMOOTHNESS_CENTS,
            min_shift_cents: DEFAULT_MIN_SHIFT_CENTS,
            max_shift_cents: DEFAULT_MAX_SHIFT_CENTS,
        }
    }
}

impl GlideConfig {
    pub fn with_min_correlation(mut self, value: f64) -> Self {
        self.min_correlation = value;
        self
    }

    pub fn with_smoothness_cents(mut self, value: f64) -> Self {
        self.smoothness_cents = value;
        self
    }

    pub fn with_shift_range(mut self, min_cents: f64, max_cents: f64) -> Self {
        self.min_shift_cents = min_cents;
        self.max_shift_cents = max_cents;
        self
    }
}

/// How the RMS-to-pitch correlation came out
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GlideCorrelation {
    /// Both series had enough points and variation
    Measured(f64),
    /// One of the series is flat
    NoVariation,
    /// Fewer than two aligned points
    InsufficientData,
}

impl GlideCorrelation {
    /// Numeric value, 0.0 when nothing could be measured
    pub fn value(&self) -> f64 {
        match self {
            GlideCorrelation::Measured(c) => *c,
            _ => 0.0,
        }
    }
}

/// Result of the harmonic-glide check
#[derive(Debug, Clone, PartialEq)]
pub struct GlideReport {
    pub source: String,
    /// Number of RMS envelope points before alignment
    pub envelope_points: usize,
    /// (min, max) of the RMS envelope
    pub rms_range: Option<(f64, f64)>,
    /// Number of aligned points used by every sub-check
    pub aligned_points: usize,
    /// (min, max) of the aligned pitch-shift series in cents
    pub shift_range: Option<(f64, f64)>,
    pub correlation: GlideCorrelation,
    /// Largest change between neighbouring pitch windows (cents)
    pub max_step_cents: f64,
    /// Largest absolute pitch shift (cents)
    pub max_shift_cents: f64,
    pub config: GlideConfig,
}

impl GlideReport {
    pub fn correlation_passed(&self) -> bool {
        matches!(self.correlation, GlideCorrelation::Measured(c) if c > self.config.min_correlation)
    }

    pub fn smooth(&self) -> bool {
        self.max_step_cents < self.config.smoothness_cents
    }

    pub fn in_range(&self) -> bool {
        self.max_shift_cents >= self.config.min_shift_cents
            && self.max_shift_cents <= self.config.max_shift_cents
    }
}

impl Verdict for GlideReport {
    fn passed(&self) -> bool {
        self.correlation_passed() && self.smooth() && self.in_range()
    }

    fn check_name(&self) -> &'static str {
        "harmonic-glide"
    }
}

fn fmt_range(range: Option<(f64, f64)>, precision: usize) -> String {
    match range {
        Some((lo, hi)) => format!("{:.*} - {:.*}", precision, lo, precision, hi),
        None => "n/a".to_string(),
    }
}

impl fmt::Display for GlideReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cfg = &self.config;

        writeln!(f, "HarmonicGlide analysis: {}", self.source)?;
        writeln!(f, "{}", rule())?;

        writeln!(f, "1. RMS envelope")?;
        writeln!(f, "   Points: {}", self.envelope_points)?;
        writeln!(f, "   Range:  {}", fmt_range(self.rms_range, 4))?;

        writeln!(f, "\n2. Pitch shift")?;
        writeln!(f, "   Points: {}", self.aligned_points)?;
        writeln!(f, "   Range:  {} cents", fmt_range(self.shift_range, 2))?;

        writeln!(f, "\n3. RMS -> pitch correlation")?;
        match self.correlation {
            GlideCorrelation::Measured(c) => {
                writeln!(f, "   Correlation: {:.3}", c)?;
                writeln!(f, "   Expected:    positive (> {})", cfg.min_correlation)?;
                writeln!(f, "   Status:      {}", status(self.correlation_passed(), "WEAK"))?;
            }
            GlideCorrelation::NoVariation => {
                writeln!(f, "   Not enough variation to correlate")?;
            }
            GlideCorrelation::InsufficientData => {
                writeln!(f, "   Not enough data to analyse")?;
            }
        }

        writeln!(f, "\n4. Smoothness")?;
        writeln!(f, "   Max change between windows: {:.2} cents", self.max_step_cents)?;
        writeln!(f, "   Threshold:                  < {} cents", cfg.smoothness_cents)?;
        writeln!(f, "   Status:                     {}", status(self.smooth(), "FAIL"))?;

        writeln!(f, "\n5. Shift range")?;
        writeln!(f, "   Max shift: {:.2} cents", self.max_shift_cents)?;
        writeln!(
            f,
            "   Expected:  ±{}-{} cents (accepted {} - {})",
            NOMINAL_SHIFT_CENTS.0, NOMINAL_SHIFT_CENTS.1, cfg.min_shift_cents, cfg.max_shift_cents
        )?;
        writeln!(f, "   Status:    {}", status(self.in_range(), "OUT OF RANGE"))?;

        writeln!(f, "\n{}", rule())?;
        writeln!(f, "Summary:")?;
        writeln!(f, "   RMS -> pitch correlation: {}", status(self.correlation_passed(), "WEAK"))?;
        writeln!(f, "   Smoothness:               {}", status(self.smooth(), "FAIL"))?;
        write!(f, "   Shift range:              {}", status(self.in_range(), "OUT OF RANGE"))?;

        if self.passed() {
            write!(f, "\n\nHarmonicGlide behaves as designed.")?;
        } else {
            write!(
                f,
                "\n\nHarmonicGlide may be misbehaving or the effect is too subtle.\n\
                 Check the Energy and Flow settings in the plugin."
            )?;
        }
        Ok(())
    }
}

/// Drop the settling windows from both series.
///
/// Only applies when the pitch series has more than ten points; the RMS
/// deltas are trimmed in that case if they have more than five.
fn discard_warmup<'a>(rms_delta: &'a [f64], shifts: &'a [f64]) -> (&'a [f64], &'a [f64]) {
    if shifts.len() <= WARMUP_MIN_PITCH_POINTS {
        return (rms_delta, shifts);
    }
    let rms_delta = if rms_delta.len() > WARMUP_WINDOWS {
        &rms_delta[WARMUP_WINDOWS..]
    } else {
        rms_delta
    };
    (rms_delta, &shifts[WARMUP_WINDOWS..])
}

fn correlate(rms_delta: &[f64], shifts: &[f64]) -> GlideCorrelation {
    if rms_delta.len() < 2 || shifts.len() < 2 {
        return GlideCorrelation::InsufficientData;
    }
    if std_dev(rms_delta) == 0.0 || std_dev(shifts) == 0.0 {
        return GlideCorrelation::NoVariation;
    }
    GlideCorrelation::Measured(pearson(rms_delta, shifts))
}

/// Run the harmonic-glide analysis on a buffer.
///
/// Stereo input is downmixed to mono by averaging.
pub fn analyze_glide(buffer: &AudioBuffer, source: &str, config: &GlideConfig) -> GlideReport {
    let samples = buffer.to_mono();
    let sample_rate = buffer.sample_rate();

    let envelope = rms_envelope(&samples, config.rms_window_ms, sample_rate);
    let rms_delta = diff(&envelope);
    let shifts = pitch_shift_series(&samples, config.pitch_window_ms, sample_rate);

    let (rms_delta, shifts) = discard_warmup(&rms_delta, &shifts);
    let aligned = rms_delta.len().min(shifts.len());
    let (rms_delta, shifts) = (&rms_delta[..aligned], &shifts[..aligned]);

    if aligned < 2 {
        warn!("{}: only {} aligned windows, too short to analyse", source, aligned);
    }

    let correlation = correlate(rms_delta, shifts);
    let max_step_cents = max_abs(&diff(shifts));
    let max_shift_cents = max_abs(shifts);

    debug!(
        "{}: envelope={} aligned={} correlation={:.4} ({:?}) max_step={:.3} max_shift={:.3}",
        source,
        envelope.len(),
        aligned,
        correlation.value(),
        correlation,
        max_step_cents,
        max_shift_cents
    );

    GlideReport {
        source: source.to_string(),
        envelope_points: envelope.len(),
        rms_range: min_max(&envelope),
        aligned_points: aligned,
        shift_range: min_max(shifts),
        correlation,
        max_step_cents,
        max_shift_cents,
        config: *config,
    }
}

/// Load a WAV file and run the harmonic-glide analysis on it.
pub fn check_glide_file(path: &Path, config: &GlideConfig) -> Result<GlideReport> {
    let buffer = load_wav(path)?;
    Ok(analyze_glide(&buffer, &path.display().to_string(), config))
}
