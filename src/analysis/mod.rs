//! Signal analysis
//!
//! Pure functions over sample slices: windowed RMS, autocorrelation pitch
//! tracking and correlation. Nothing in here touches files or prints.

pub mod correlation;
pub mod envelope;
pub mod pitch;
pub mod stats;

pub use correlation::pearson;
pub use envelope::{rms_envelope, window_samples, RMS_WINDOW_MS};
pub use pitch::{
    cents_between, estimate_frequency, pitch_shift_series, PitchTracker, MAX_PITCH_HZ,
    MIN_PITCH_HZ, PITCH_WINDOW_MS,
};
