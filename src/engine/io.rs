//! Audio file I/O for voidcheck
//!
//! Reads PCM WAV files into normalized f32 buffers and writes 16-bit PCM
//! fixtures. The sample rate always comes from the file header.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::debug;

use crate::engine::buffer::AudioBuffer;
use crate::error::{CheckError, Result};

/// Full-scale divisor for 16-bit integer samples
pub const I16_FULL_SCALE: f32 = 32768.0;

/// Full-scale divisor for 32-bit integer samples (2^31)
pub const I32_FULL_SCALE: f32 = 2_147_483_648.0;

/// Scale applied when quantizing float samples to 16-bit PCM
const I16_WRITE_SCALE: f32 = 32767.0;

/// Load a WAV file into an AudioBuffer
///
/// Integer samples are divided by their format's full-scale value so the
/// buffer always holds samples in -1.0..1.0. Float files pass through.
///
/// # Errors
/// * `AudioRead` - If the file is missing, unreadable or not a WAV file
/// * `UnsupportedFormat` - If the bit depth is not 8, 16, 24 or 32
///
/// A file with zero frames loads as an empty buffer.
pub fn load_wav<P: AsRef<Path>>(path: P) -> Result<AudioBuffer> {
    let path = path.as_ref();
    let reader = WavReader::open(path).map_err(|e| CheckError::AudioRead {
        path: path.display().to_string(),
        source: e,
    })?;

    let spec = reader.spec();
    let samples = read_samples_as_f32(reader, path, spec.bits_per_sample, spec.sample_format)?;
    let buffer = AudioBuffer::new(samples, spec.channels, spec.sample_rate)?;

    debug!(
        "{}: {} ch, {} Hz, {}-bit {:?}, {:.3}s",
        path.display(),
        spec.channels,
        spec.sample_rate,
        spec.bits_per_sample,
        spec.sample_format,
        buffer.duration()
    );

    Ok(buffer)
}

/// Save an AudioBuffer as 16-bit PCM.
///
/// Samples are scaled by 32767 and truncated toward zero, after clamping to
/// the valid range.
pub fn save_wav_pcm16<P: AsRef<Path>>(buffer: &AudioBuffer, path: P) -> Result<()> {
    let path = path.as_ref();
    let write_err = |e| CheckError::AudioWrite {
        path: path.display().to_string(),
        source: e,
    };

    let spec = WavSpec {
        channels: buffer.channels(),
        sample_rate: buffer.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec).map_err(write_err)?;

    for &sample in buffer.samples() {
        let scaled = (sample * I16_WRITE_SCALE).clamp(-I16_FULL_SCALE, I16_WRITE_SCALE) as i16;
        writer.write_sample(scaled).map_err(write_err)?;
    }

    writer.finalize().map_err(write_err)?;

    Ok(())
}

// ============================================================================
// Internal helper functions
// ============================================================================

/// Read samples from WAV reader and convert to f32
fn read_samples_as_f32<R: std::io::Read>(
    mut reader: WavReader<R>,
    path: &Path,
    bits_per_sample: u16,
    sample_format: SampleFormat,
) -> Result<Vec<f32>> {
    let read_err = |e| CheckError::AudioRead {
        path: path.display().to_string(),
        source: e,
    };

    match sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<Vec<f32>, _>>()
            .map_err(read_err),
        SampleFormat::Int => match bits_per_sample {
            8 => reader
                .samples::<i8>()
                .map(|s| s.map(|v| v as f32 / 128.0))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(read_err),
            16 => reader
                .samples::<i16>()
                .map(|s| s.map(|v| v as f32 / I16_FULL_SCALE))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(read_err),
            24 => {
                // 24-bit stored as i32 in hound
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / 8_388_608.0))
                    .collect::<std::result::Result<Vec<f32>, _>>()
                    .map_err(read_err)
            }
            32 => reader
                .samples::<i32>()
                .map(|s| s.map(|v| (v as f64 / I32_FULL_SCALE as f64) as f32))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(read_err),
            _ => Err(CheckError::UnsupportedFormat {
                details: format!("{}-bit integer audio", bits_per_sample),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sine(frequency: f32, num_frames: usize, sample_rate: u32) -> Vec<f32> {
        (0..num_frames)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                0.5 * (2.0 * std::f32::consts::PI * frequency * t).sin()
            })
            .collect()
    }

    #[test]
    fn test_pcm16_round_trip_stereo() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stereo.wav");

        let left = sine(440.0, 4410, 44100);
        let right = sine(880.0, 4410, 44100);
        let original = AudioBuffer::stereo(&left, &right, 44100).unwrap();
        save_wav_pcm16(&original, &path).unwrap();

        let loaded = load_wav(&path).unwrap();
        assert_eq!(loaded.channels(), 2);
        assert_eq!(loaded.sample_rate(), 44100);
        assert_eq!(loaded.num_frames(), 4410);

        for (orig, read) in original.samples().iter().zip(loaded.samples()) {
            // Truncation to 16-bit loses at most two LSBs after rescaling
            assert!((orig - read).abs() < 1e-4, "{} vs {}", orig, read);
        }
    }

    #[test]
    fn test_load_32bit_int_normalized() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("int32.wav");

        let spec = WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for v in [i32::MIN, 0, 1 << 30] {
            writer.write_sample(v).unwrap();
        }
        writer.finalize().unwrap();

        let loaded = load_wav(&path).unwrap();
        assert_eq!(loaded.samples(), &[-1.0, 0.0, 0.5]);
    }

    #[test]
    fn test_load_float_passthrough() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("float.wav");

        let spec = WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for v in [0.25_f32, -0.75] {
            writer.write_sample(v).unwrap();
        }
        writer.finalize().unwrap();

        let loaded = load_wav(&path).unwrap();
        assert_eq!(loaded.samples(), &[0.25, -0.75]);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = load_wav("/nonexistent/path/audio.wav");
        match result {
            Err(CheckError::AudioRead { path, .. }) => assert!(path.contains("nonexistent")),
            other => panic!("Expected AudioRead error, got: {:?}", other),
        }
    }

    #[test]
    fn test_load_garbage_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage.wav");
        std::fs::write(&path, b"definitely not a riff header").unwrap();

        assert!(matches!(load_wav(&path), Err(CheckError::AudioRead { .. })));
    }
}
