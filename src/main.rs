//! voidcheck CLI
//!
//! Exit code 0 means the requested check passed, 1 means it failed.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::debug;

use voidcheck::checks::{GlideConfig, LufsConfig, MonoConfig};
use voidcheck::cli::{commands, Cli, Commands};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    debug!("voidcheck v{}", env!("CARGO_PKG_VERSION"));

    let passed = handle_command(cli.command)?;
    Ok(if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn handle_command(cmd: Commands) -> anyhow::Result<bool> {
    let passed = match cmd {
        Commands::HarmonicGlide {
            file,
            min_correlation,
            smoothness_cents,
            min_shift_cents,
            max_shift_cents,
        } => {
            let config = GlideConfig::default()
                .with_min_correlation(min_correlation)
                .with_smoothness_cents(smoothness_cents)
                .with_shift_range(min_shift_cents, max_shift_cents);
            commands::harmonic_glide(&file, &config)
        }
        Commands::Lufs {
            dry,
            wet,
            tolerance_db,
        } => commands::lufs(&dry, &wet, &LufsConfig::default().with_tolerance_db(tolerance_db)),
        Commands::Mono { files, threshold } => {
            commands::mono(&files, &MonoConfig::default().with_threshold(threshold))
        }
        Commands::CreateFixtures { output_dir } => {
            commands::create_fixtures(&output_dir).with_context(|| {
                format!("failed to write fixtures to {}", output_dir.display())
            })?;
            true
        }
    };
    Ok(passed)
}
