//! Integration Tests
//!
//! End-to-end runs of every check against the synthesized fixtures,
//! written to and read back from real WAV files.

use std::path::{Path, PathBuf};

use approx::assert_abs_diff_eq;
use tempfile::{tempdir, TempDir};

use voidcheck::checks::glide::GlideCorrelation;
use voidcheck::checks::{
    check_glide_file, check_lufs_files, check_mono_file, GlideConfig, LufsConfig, MonoConfig,
};
use voidcheck::engine::synth::{DRY_FIXTURE, GLIDE_FIXTURE, MONO_FIXTURE, WET_FIXTURE};
use voidcheck::engine::{load_wav, save_wav_pcm16, write_fixtures, AudioBuffer};
use voidcheck::{CheckError, Verdict};

/// Helper to write all fixtures into a fresh temporary directory
fn fixtures() -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().to_path_buf();
    write_fixtures(&path).unwrap();
    (dir, path)
}

fn fixture(dir: &Path, name: &str) -> PathBuf {
    dir.join(name)
}

// === Mono Compatibility ===

#[test]
fn test_mono_fixture_passes() {
    let (_guard, dir) = fixtures();
    let report = check_mono_file(&fixture(&dir, MONO_FIXTURE), &MonoConfig::default()).unwrap();

    assert!(
        report.correlation > 0.6,
        "correlation {:.4} should exceed 0.6",
        report.correlation
    );
    assert_abs_diff_eq!(report.correlation, 0.1_f64.cos(), epsilon = 1e-3);
    assert!(report.passed());
}

#[test]
fn test_mono_check_rejects_mono_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mono.wav");
    let samples: Vec<f32> = (0..4410).map(|i| (i as f32 * 0.05).sin() * 0.5).collect();
    save_wav_pcm16(&AudioBuffer::mono(samples, 44100).unwrap(), &path).unwrap();

    let result = check_mono_file(&path, &MonoConfig::default());
    assert!(matches!(result, Err(CheckError::NotStereo { channels: 1, .. })));
}

#[test]
fn test_mono_check_silent_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("silent.wav");
    save_wav_pcm16(&AudioBuffer::new(vec![0.0; 8820], 2, 44100).unwrap(), &path).unwrap();

    let report = check_mono_file(&path, &MonoConfig::default()).unwrap();
    assert_eq!(report.correlation, 0.0);
    assert!(!report.passed());
}

// === Loudness ===

#[test]
fn test_dry_wet_fixture_within_tolerance() {
    let (_guard, dir) = fixtures();
    let report = check_lufs_files(
        &fixture(&dir, DRY_FIXTURE),
        &fixture(&dir, WET_FIXTURE),
        &LufsConfig::default(),
    )
    .unwrap();

    let expected = -20.0 * 0.95_f64.log10();
    assert_abs_diff_eq!(report.diff_db, expected, epsilon = 0.01);
    assert!(report.lufs_wet < report.lufs_dry);
    assert!(report.passed());
}

#[test]
fn test_dry_wet_fails_with_tight_tolerance() {
    let (_guard, dir) = fixtures();
    let config = LufsConfig::default().with_tolerance_db(0.1);
    let dry = fixture(&dir, DRY_FIXTURE);
    let wet = fixture(&dir, WET_FIXTURE);
    let report = check_lufs_files(&dry, &wet, &config).unwrap();

    assert!(!report.passed());
}

#[test]
fn test_same_file_has_zero_difference() {
    let (_guard, dir) = fixtures();
    let dry = fixture(&dir, DRY_FIXTURE);
    let config = LufsConfig::default().with_tolerance_db(0.0);
    let report = check_lufs_files(&dry, &dry, &config).unwrap();

    assert_eq!(report.diff_db, 0.0);
    assert!(report.passed());
}

#[test]
fn test_missing_wet_file_is_an_error() {
    let (_guard, dir) = fixtures();
    let result = check_lufs_files(
        &fixture(&dir, DRY_FIXTURE),
        &dir.join("does_not_exist.wav"),
        &LufsConfig::default(),
    );
    match result {
        Err(CheckError::AudioRead { path, .. }) => assert!(path.contains("does_not_exist")),
        other => panic!("Expected AudioRead error, got: {:?}", other),
    }
}

// === Harmonic Glide ===

#[test]
fn test_glide_fixture_is_too_coarse_to_pass() {
    // Integer-lag pitch estimates move in steps of ~17 cents around 440 Hz,
    // so the synthetic fixture correlates but is neither smooth nor in range.
    let (_guard, dir) = fixtures();
    let report = check_glide_file(&fixture(&dir, GLIDE_FIXTURE), &GlideConfig::default()).unwrap();

    assert_eq!(report.envelope_points, 300);
    assert_eq!(report.aligned_points, 55);
    assert!(matches!(report.correlation, GlideCorrelation::Measured(c) if c > 0.0));
    assert!(report.max_step_cents > 10.0);
    assert!(!report.smooth());
    assert!(!report.in_range());
    assert!(!report.passed());
}

#[test]
fn test_glide_thresholds_are_overridable() {
    let (_guard, dir) = fixtures();
    let path = fixture(&dir, GLIDE_FIXTURE);

    let loose = GlideConfig::default()
        .with_min_correlation(-1.0)
        .with_smoothness_cents(100.0)
        .with_shift_range(0.0, 100.0);
    let report = check_glide_file(&path, &loose).unwrap();

    assert!(report.smooth());
    assert!(report.in_range());
}

#[test]
fn test_checks_are_idempotent() {
    let (_guard, dir) = fixtures();
    let glide = fixture(&dir, GLIDE_FIXTURE);
    let mono = fixture(&dir, MONO_FIXTURE);

    let first = check_glide_file(&glide, &GlideConfig::default()).unwrap();
    let second = check_glide_file(&glide, &GlideConfig::default()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_string(), second.to_string());

    let first = check_mono_file(&mono, &MonoConfig::default()).unwrap();
    let second = check_mono_file(&mono, &MonoConfig::default()).unwrap();
    assert_eq!(first.to_string(), second.to_string());

    let dry = fixture(&dir, DRY_FIXTURE);
    let wet = fixture(&dir, WET_FIXTURE);
    let first = check_lufs_files(&dry, &wet, &LufsConfig::default()).unwrap();
    let second = check_lufs_files(&dry, &wet, &LufsConfig::default()).unwrap();
    assert_eq!(first.diff_db, second.diff_db);
    assert_eq!(first.to_string(), second.to_string());
}

// === Zero-frame files ===

/// Helper to write a valid 16-bit stereo WAV header with no frames
fn zero_frame_wav(dir: &Path) -> PathBuf {
    let path = dir.join("zero_frames.wav");
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: 44100,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    hound::WavWriter::create(&path, spec).unwrap().finalize().unwrap();
    path
}

#[test]
fn test_zero_frame_file_loads_empty() {
    let dir = tempdir().unwrap();
    let buffer = load_wav(zero_frame_wav(dir.path())).unwrap();

    assert!(buffer.is_stereo());
    assert_eq!(buffer.num_frames(), 0);
}

#[test]
fn test_zero_frame_file_same_file_loudness_passes() {
    let dir = tempdir().unwrap();
    let path = zero_frame_wav(dir.path());
    let report = check_lufs_files(&path, &path, &LufsConfig::default()).unwrap();

    assert_eq!(report.lufs_dry, f64::NEG_INFINITY);
    assert_eq!(report.diff_db, 0.0);
    assert!(report.passed());
}

#[test]
fn test_zero_frame_file_mono_check_fails() {
    let dir = tempdir().unwrap();
    let path = zero_frame_wav(dir.path());
    let report = check_mono_file(&path, &MonoConfig::default()).unwrap();

    assert_eq!(report.correlation, 0.0);
    assert!(!report.passed());
}

#[test]
fn test_zero_frame_file_glide_has_insufficient_data() {
    let dir = tempdir().unwrap();
    let path = zero_frame_wav(dir.path());
    let report = check_glide_file(&path, &GlideConfig::default()).unwrap();

    assert_eq!(report.envelope_points, 0);
    assert_eq!(report.aligned_points, 0);
    assert_eq!(report.correlation, GlideCorrelation::InsufficientData);
    assert!(!report.passed());
}

// === Fixtures ===

#[test]
fn test_fixtures_are_16bit_stereo() {
    let (_guard, dir) = fixtures();
    for name in [MONO_FIXTURE, DRY_FIXTURE, WET_FIXTURE, GLIDE_FIXTURE] {
        let path = fixture(&dir, name);
        let spec = hound::WavReader::open(&path).unwrap().spec();
        assert_eq!(spec.bits_per_sample, 16, "{}", name);
        assert_eq!(spec.channels, 2, "{}", name);
        assert_eq!(spec.sample_rate, 44100, "{}", name);

        let buffer = load_wav(&path).unwrap();
        assert!(buffer.samples().iter().all(|s| s.abs() <= 1.0));
    }
}
