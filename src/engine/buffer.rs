//! Audio buffer implementation
//!
//! AudioBuffer holds decoded or synthesized samples for the duration of one
//! check. Buffers are never edited after construction; derived views
//! (single channels, mono downmix) are fresh allocations.

use crate::error::{CheckError, Result};

/// Audio sample data with metadata
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    /// Interleaved audio samples normalized to -1.0..1.0
    samples: Vec<f32>,
    /// Number of audio channels (1 = mono, 2 = stereo)
    channels: u16,
    /// Sample rate in Hz
    sample_rate: u32,
}

impl AudioBuffer {
    /// Create a new audio buffer with the given parameters.
    ///
    /// Zero frames is a valid buffer; the analyses degrade to their empty
    /// defaults on it.
    pub fn new(samples: Vec<f32>, channels: u16, sample_rate: u32) -> Result<Self> {
        if channels == 0 || samples.len() % channels as usize != 0 {
            return Err(CheckError::UnsupportedFormat {
                details: format!(
                    "Sample count {} is not divisible by channel count {}",
                    samples.len(),
                    channels
                ),
            });
        }
        Ok(Self {
            samples,
            channels,
            sample_rate,
        })
    }

    /// Build a mono buffer from a single channel of samples
    pub fn mono(samples: Vec<f32>, sample_rate: u32) -> Result<Self> {
        Self::new(samples, 1, sample_rate)
    }

    /// Build a stereo buffer by interleaving two channels.
    ///
    /// The longer channel is truncated to the length of the shorter one.
    pub fn stereo(left: &[f32], right: &[f32], sample_rate: u32) -> Result<Self> {
        let samples = left
            .iter()
            .zip(right.iter())
            .flat_map(|(&l, &r)| [l, r])
            .collect();
        Self::new(samples, 2, sample_rate)
    }

    /// Get a reference to the interleaved samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Get the number of channels
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Get the sample rate
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get the number of frames (samples per channel)
    pub fn num_frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    /// Get the duration in seconds
    pub fn duration(&self) -> f32 {
        self.num_frames() as f32 / self.sample_rate as f32
    }

    pub fn is_stereo(&self) -> bool {
        self.channels == 2
    }

    /// Get samples for a specific channel (0-indexed)
    pub fn channel_samples(&self, channel: u16) -> Vec<f32> {
        if channel >= self.channels {
            return Vec::new();
        }
        self.samples
            .iter()
            .skip(channel as usize)
            .step_by(self.channels as usize)
            .copied()
            .collect()
    }

    /// Downmix to mono by averaging all channels of each frame.
    ///
    /// A mono buffer is returned as a plain copy of its samples.
    pub fn to_mono(&self) -> Vec<f32> {
        if self.channels == 1 {
            return self.samples.clone();
        }
        let channels = self.channels as usize;
        self.samples
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    }
}
