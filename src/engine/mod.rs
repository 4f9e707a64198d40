//! Audio Engine Module
//!
//! Audio data handling for the checks:
//! - Audio buffer and channel views
//! - WAV file I/O
//! - Fixture synthesis

pub mod buffer;
pub mod io;
pub mod synth;

pub use buffer::AudioBuffer;
pub use io::{load_wav, save_wav_pcm16};
pub use synth::{dry_wet_fixture, harmonic_glide_fixture, mono_compat_fixture, write_fixtures};
