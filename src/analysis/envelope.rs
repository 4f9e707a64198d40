//! RMS envelope extraction

use super::stats::rms;

/// Window length used by the harmonic-glide envelope (milliseconds)
pub const RMS_WINDOW_MS: f64 = 10.0;

/// Convert a window length in milliseconds to a sample count.
pub fn window_samples(window_ms: f64, sample_rate: u32) -> usize {
    (window_ms * sample_rate as f64 / 1000.0).round() as usize
}

/// RMS of each consecutive, non-overlapping window.
///
/// A trailing partial window is dropped, so the output has
/// `samples.len() / window_samples` entries and is empty when the buffer is
/// shorter than one window.
pub fn rms_envelope(samples: &[f32], window_ms: f64, sample_rate: u32) -> Vec<f64> {
    let window = window_samples(window_ms, sample_rate);
    if window == 0 {
        return Vec::new();
    }
    samples.chunks_exact(window).map(rms).collect()
}
