//! voidcheck - Offline validation for the VOID Engine plugin
//!
//! Rendered WAV files are checked against fixed acceptance thresholds:
//! 1. Loudness: dry and wet renders stay within a dB tolerance
//! 2. Mono compatibility: L/R correlation stays above 0.6
//! 3. Harmonic glide: pitch follows loudness smoothly, by a few cents
//!
//! # Architecture
//!
//! - `engine`: audio buffers, WAV I/O and fixture synthesis
//! - `analysis`: pure signal math (RMS envelope, pitch tracking, correlation)
//! - `checks`: thresholds, verdicts and printable reports
//! - `cli`: argument parsing and the single reporting path

pub mod analysis;
pub mod checks;
pub mod cli;
pub mod engine;
pub mod error;

pub use checks::Verdict;
pub use engine::AudioBuffer;
pub use error::{CheckError, Result};
