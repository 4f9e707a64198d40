//! Error handling for voidcheck
//!
//! Only file-level failures are errors. Numeric degeneracy (silent windows,
//! zero-variance channels, too-short buffers) is resolved inline with
//! zero-valued defaults and never surfaces here.

use thiserror::Error;

/// Result type alias for voidcheck operations
pub type Result<T> = std::result::Result<T, CheckError>;

/// Errors that abort a single check
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Failed to read audio file: {path}")]
    AudioRead {
        path: String,
        #[source]
        source: hound::Error,
    },

    #[error("Failed to write audio file: {path}")]
    AudioWrite {
        path: String,
        #[source]
        source: hound::Error,
    },

    #[error("Unsupported audio format: {details}")]
    UnsupportedFormat { details: String },

    #[error("{path} is not a stereo file ({channels} channel(s))")]
    NotStereo { path: String, channels: u16 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CheckError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            CheckError::AudioRead { .. } => "AUDIO_READ",
            CheckError::AudioWrite { .. } => "AUDIO_WRITE",
            CheckError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            CheckError::NotStereo { .. } => "NOT_STEREO",
            CheckError::Io(_) => "IO_ERROR",
        }
    }

    /// Returns a suggested recovery action for this error
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::AudioRead { .. } => "Check that the file exists and is a valid WAV file",
            Self::AudioWrite { .. } => "Check that the output directory exists and is writable",
            Self::UnsupportedFormat { .. } => {
                "Convert to PCM WAV (16/24/32-bit integer or 32-bit float)"
            }
            Self::NotStereo { .. } => "Export the plugin output as a stereo file",
            Self::Io(_) => "Check file permissions and free disk space",
        }
    }
}
