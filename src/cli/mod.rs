//! CLI Module
//!
//! Command-line interface for the validation checks.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::checks::glide::{
    DEFAULT_MAX_SHIFT_CENTS, DEFAULT_MIN_CORRELATION, DEFAULT_MIN_SHIFT_CENTS,
    DEFAULT_SMOOTHNESS_CENTS,
};
use crate::checks::lufs::DEFAULT_TOLERANCE_DB;
use crate::checks::mono::MONO_THRESHOLD;

/// Offline validation checks for VOID Engine renders
#[derive(Parser, Debug)]
#[command(name = "voidcheck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Verify that pitch follows loudness smoothly (HarmonicGlide)
    #[command(name = "harmonic-glide", alias = "check_harmonic_glide")]
    HarmonicGlide {
        /// WAV file rendered with HarmonicGlide enabled
        file: PathBuf,

        /// Minimum RMS-to-pitch correlation
        #[arg(long, default_value_t = DEFAULT_MIN_CORRELATION)]
        min_correlation: f64,

        /// Maximum pitch change between neighbouring windows, in cents
        #[arg(long, default_value_t = DEFAULT_SMOOTHNESS_CENTS)]
        smoothness_cents: f64,

        /// Lower bound for the maximum pitch shift, in cents
        #[arg(long, default_value_t = DEFAULT_MIN_SHIFT_CENTS)]
        min_shift_cents: f64,

        /// Upper bound for the maximum pitch shift, in cents
        #[arg(long, default_value_t = DEFAULT_MAX_SHIFT_CENTS)]
        max_shift_cents: f64,
    },

    /// Compare approximate loudness of a dry and a wet render
    #[command(name = "lufs", alias = "check_lufs")]
    Lufs {
        /// Unprocessed WAV file
        dry: PathBuf,

        /// Processed WAV file
        wet: PathBuf,

        /// Allowed loudness difference in dB
        #[arg(default_value_t = DEFAULT_TOLERANCE_DB)]
        tolerance_db: f64,
    },

    /// Check L/R correlation of one or more stereo files
    #[command(name = "mono", alias = "check_mono_compatibility")]
    Mono {
        /// Stereo WAV files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Minimum L/R correlation
        #[arg(long, default_value_t = MONO_THRESHOLD)]
        threshold: f64,
    },

    /// Write synthetic WAV fixtures for the other checks
    #[command(name = "create-fixtures", alias = "create_test_files")]
    CreateFixtures {
        /// Directory to write the fixtures into
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },
}
