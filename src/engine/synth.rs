//! Test fixture synthesis
//!
//! Deterministic WAV fixtures that exercise each check. Nothing here
//! analyses audio; it only produces buffers and writes them.

use std::f64::consts::PI;
use std::path::{Path, PathBuf};

use log::info;

use crate::engine::buffer::AudioBuffer;
use crate::engine::io::save_wav_pcm16;
use crate::error::Result;

/// Sample rate for all generated fixtures
pub const FIXTURE_SAMPLE_RATE: u32 = 44100;

/// Carrier frequency for all generated fixtures (A4)
pub const FIXTURE_FREQUENCY: f64 = 440.0;

/// Phase offset of the right channel in the mono-compatibility fixture (radians)
pub const MONO_PHASE_OFFSET: f64 = 0.1;

/// Gain applied to the wet fixture relative to the dry one (about -0.45 dB)
pub const WET_GAIN: f64 = 0.95;

/// Fixture file names, in the order they are written
pub const MONO_FIXTURE: &str = "test_mono.wav";
pub const DRY_FIXTURE: &str = "test_dry.wav";
pub const WET_FIXTURE: &str = "test_wet.wav";
pub const GLIDE_FIXTURE: &str = "test_harmonic_glide.wav";

/// Evenly spaced time points from 0 to `duration_secs` inclusive.
fn time_base(duration_secs: f64, sample_rate: u32) -> Vec<f64> {
    let num_samples = (duration_secs * sample_rate as f64) as usize;
    if num_samples < 2 {
        return vec![0.0; num_samples];
    }
    let step = duration_secs / (num_samples - 1) as f64;
    (0..num_samples).map(|i| i as f64 * step).collect()
}

fn to_f32(samples: impl IntoIterator<Item = f64>) -> Vec<f32> {
    samples.into_iter().map(|s| s as f32).collect()
}

/// Stereo pair at the same frequency with a small constant phase offset.
pub fn mono_compat_fixture(duration_secs: f64, sample_rate: u32) -> Result<AudioBuffer> {
    let t = time_base(duration_secs, sample_rate);
    let omega = 2.0 * PI * FIXTURE_FREQUENCY;

    let left = to_f32(t.iter().map(|&t| (omega * t).sin() * 0.5));
    let right = to_f32(t.iter().map(|&t| (omega * t + MONO_PHASE_OFFSET).sin() * 0.5));

    AudioBuffer::stereo(&left, &right, sample_rate)
}

/// Dry sine and a wet copy attenuated by [`WET_GAIN`], both dual-mono stereo.
pub fn dry_wet_fixture(duration_secs: f64, sample_rate: u32) -> Result<(AudioBuffer, AudioBuffer)> {
    let t = time_base(duration_secs, sample_rate);
    let omega = 2.0 * PI * FIXTURE_FREQUENCY;

    let dry: Vec<f64> = t.iter().map(|&t| (omega * t).sin() * 0.5).collect();
    let wet = to_f32(dry.iter().map(|&s| s * WET_GAIN));
    let dry = to_f32(dry);

    Ok((
        AudioBuffer::stereo(&dry, &dry, sample_rate)?,
        AudioBuffer::stereo(&wet, &wet, sample_rate)?,
    ))
}

/// Sine whose amplitude follows a slow 0.5 Hz envelope and whose frequency
/// rises with that same envelope, giving a synthetic loudness-to-pitch link.
pub fn harmonic_glide_fixture(duration_secs: f64, sample_rate: u32) -> Result<AudioBuffer> {
    let t = time_base(duration_secs, sample_rate);

    let samples = to_f32(t.iter().map(|&t| {
        let envelope = 0.3 + 0.3 * (2.0 * PI * 0.5 * t).sin();
        let pitch_modulation = (envelope - 0.3) * 0.01;
        (2.0 * PI * FIXTURE_FREQUENCY * (1.0 + pitch_modulation) * t).sin() * envelope
    }));

    AudioBuffer::stereo(&samples, &samples, sample_rate)
}

/// Write every fixture into `dir` and return the written paths.
pub fn write_fixtures(dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(4);
    let mut write = |name: &str, buffer: &AudioBuffer| -> Result<()> {
        let path = dir.join(name);
        save_wav_pcm16(buffer, &path)?;
        info!("Wrote fixture {}", path.display());
        written.push(path);
        Ok(())
    };

    write(MONO_FIXTURE, &mono_compat_fixture(2.0, FIXTURE_SAMPLE_RATE)?)?;

    let (dry, wet) = dry_wet_fixture(2.0, FIXTURE_SAMPLE_RATE)?;
    write(DRY_FIXTURE, &dry)?;
    write(WET_FIXTURE, &wet)?;

    write(GLIDE_FIXTURE, &harmonic_glide_fixture(3.0, FIXTURE_SAMPLE_RATE)?)?;

    Ok(written)
}
