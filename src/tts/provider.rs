//! `SpeechProvider` trait and `TtsError`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur in a single synthesis provider.
#[derive(Debug, Error)]
pub enum TtsError {
    /// No API key was configured for the provider.
    #[error("{0} is not set")]
    MissingCredential(&'static str),

    /// Writing the audio file failed.
    #[error("failed to write audio file: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("speech request timed out")]
    Timeout,

    /// The service answered with a non-success status.
    #[error("speech service returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The provider produced no audio bytes.
    #[error("speech provider returned no audio")]
    EmptyAudio,

    /// The local engine could not be started or exited unsuccessfully.
    #[error("speech engine failed: {0}")]
    Engine(String),
}

impl From<reqwest::Error> for TtsError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TtsError::Timeout
        } else {
            TtsError::Request(e.to_string())
        }
    }
}

/// A backend that turns text into an audio file.
///
/// `out` is a suggested destination. Providers that produce a different
/// container may write next to it with their own extension; the returned
/// path is authoritative.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Short identifier used in log lines.
    fn name(&self) -> &str;

    async fn synthesize(&self, text: &str, out: &Path) -> Result<PathBuf, TtsError>;
}
