//! Autocorrelation pitch estimation
//!
//! Each fixed-size window gets one fundamental-frequency estimate from the
//! lag of maximum self-similarity. Successive voiced estimates are turned
//! into pitch changes in cents by folding a [`PitchTracker`] over the
//! windows, so the "previous pitch" reference is explicit state rather than
//! a loop variable.

use log::debug;

use super::envelope::window_samples;
use super::stats::{demean, std_dev};

/// Window length used by the harmonic-glide pitch series (milliseconds)
pub const PITCH_WINDOW_MS: f64 = 50.0;

/// Lowest fundamental considered (sets the longest lag searched)
pub const MIN_PITCH_HZ: f64 = 80.0;

/// Highest fundamental considered (sets the shortest lag searched)
pub const MAX_PITCH_HZ: f64 = 2000.0;

/// Cents per octave
pub const CENTS_PER_OCTAVE: f64 = 1200.0;

/// Interval from `from_hz` to `to_hz` in cents.
pub fn cents_between(from_hz: f64, to_hz: f64) -> f64 {
    CENTS_PER_OCTAVE * (to_hz / from_hz).log2()
}

/// Estimate the fundamental of one window in Hz.
///
/// Returns `None` for a silent (zero-variance) window, when the lag search
/// range is empty after clipping to the window length, or when the best lag
/// is zero.
pub fn estimate_frequency(window: &[f32], sample_rate: u32) -> Option<f64> {
    let centred = demean(&window.iter().map(|&s| s as f64).collect::<Vec<_>>());
    if std_dev(&centred) == 0.0 {
        return None;
    }

    let min_lag = (sample_rate as f64 / MAX_PITCH_HZ) as usize;
    let max_lag = ((sample_rate as f64 / MIN_PITCH_HZ) as usize).min(centred.len());
    if min_lag >= max_lag {
        return None;
    }

    let period = peak_lag(&centred, min_lag, max_lag);
    if period == 0 {
        return None;
    }
    Some(sample_rate as f64 / period as f64)
}

/// Lag in `[min_lag, max_lag)` with the largest autocorrelation.
///
/// Ties resolve to the shortest lag.
fn peak_lag(signal: &[f64], min_lag: usize, max_lag: usize) -> usize {
    let mut best_lag = min_lag;
    let mut best_value = f64::NEG_INFINITY;

    for lag in min_lag..max_lag {
        let value: f64 = signal[..signal.len() - lag]
            .iter()
            .zip(&signal[lag..])
            .map(|(a, b)| a * b)
            .sum();
        if value > best_value {
            best_value = value;
            best_lag = lag;
        }
    }

    best_lag
}

/// Accumulator for the pitch-shift fold.
#[derive(Debug, Clone, Default)]
pub struct PitchTracker {
    previous_hz: Option<f64>,
    shifts: Vec<f64>,
}

impl PitchTracker {
    /// Consume one window's estimate.
    ///
    /// Emits the interval from the previous voiced estimate, or 0.0 when
    /// either side is missing. Only a voiced window moves the reference.
    pub fn observe(mut self, frequency: Option<f64>) -> Self {
        let shift = match (frequency, self.previous_hz) {
            (Some(current), Some(previous)) if current > 0.0 && previous > 0.0 => {
                cents_between(previous, current)
            }
            _ => 0.0,
        };
        self.shifts.push(shift);

        if let Some(current) = frequency.filter(|&f| f > 0.0) {
            self.previous_hz = Some(current);
        }
        self
    }

    /// Last voiced estimate seen so far
    pub fn previous_hz(&self) -> Option<f64> {
        self.previous_hz
    }

    pub fn into_shifts(self) -> Vec<f64> {
        self.shifts
    }
}

/// Pitch change in cents for every complete window of `samples`.
///
/// The first voiced window, and every silent or unpitched window, yields 0.0.
pub fn pitch_shift_series(samples: &[f32], window_ms: f64, sample_rate: u32) -> Vec<f64> {
    let window = window_samples(window_ms, sample_rate);
    if window == 0 {
        return Vec::new();
    }

    let tracker = samples
        .chunks_exact(window)
        .map(|chunk| estimate_frequency(chunk, sample_rate))
        .fold(PitchTracker::default(), PitchTracker::observe);

    debug!(
        "pitch series: {} windows of {} samples, last estimate {:?} Hz",
        samples.len() / window,
        window,
        tracker.previous_hz()
    );

    tracker.into_shifts()
}
