//! Core `Transcriber` trait and `GroqTranscriber` implementation.
//!
//! `GroqTranscriber` speaks the OpenAI `audio/transcriptions` wire format
//! (multipart upload, JSON `{ "text": ... }` reply). Connection details come
//! from [`TranscriptionConfig`]; the key comes from [`Credentials`].

use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart;
use thiserror::Error;

use crate::config::credentials::GROQ_API_KEY_VAR;
use crate::config::{Credentials, TranscriptionConfig};
use crate::http;

// ---------------------------------------------------------------------------
// SttError
// ---------------------------------------------------------------------------

/// Errors that can occur during transcription.
#[derive(Debug, Error)]
pub enum SttError {
    /// No API key was configured for the transcription service.
    #[error("{0} is not set")]
    MissingCredential(&'static str),

    /// The audio file could not be read.
    #[error("failed to read audio file: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("transcription request timed out")]
    Timeout,

    /// The service answered with a non-success status.
    #[error("transcription service returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body was not the expected JSON.
    #[error("failed to parse transcription response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for SttError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SttError::Timeout
        } else {
            SttError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Transcriber trait
// ---------------------------------------------------------------------------

/// Async, object-safe interface for speech-to-text backends.
///
/// Implementors must be `Send + Sync` so they can be held behind an
/// `Arc<dyn Transcriber>`.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe the audio file at `audio` and return plain text.
    async fn transcribe(&self, audio: &Path) -> Result<String, SttError>;
}

/// Content type for an audio upload, inferred from the file extension.
///
/// Browser recordings arrive as `.webm`; unknown extensions are sent as WAV.
pub fn audio_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("mp3") | Some("mpeg") | Some("mpga") => "audio/mpeg",
        Some("m4a") | Some("mp4") => "audio/mp4",
        Some("ogg") | Some("opus") => "audio/ogg",
        Some("webm") => "audio/webm",
        Some("flac") => "audio/flac",
        _ => "audio/wav",
    }
}

// ---------------------------------------------------------------------------
// GroqTranscriber
// ---------------------------------------------------------------------------

/// Uploads audio to an OpenAI-compatible `/audio/transcriptions` endpoint.
pub struct GroqTranscriber {
    client: reqwest::Client,
    config: TranscriptionConfig,
    api_key: Option<String>,
}

impl GroqTranscriber {
    /// Build a transcriber from config and process-wide credentials.
    pub fn from_config(config: &TranscriptionConfig, credentials: &Credentials) -> Self {
        Self {
            client: http::client_with_timeout(config.timeout_secs),
            config: config.clone(),
            api_key: credentials.groq_api_key.clone(),
        }
    }
}

#[async_trait]
impl Transcriber for GroqTranscriber {
    async fn transcribe(&self, audio: &Path) -> Result<String, SttError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(SttError::MissingCredential(GROQ_API_KEY_VAR))?;

        let bytes = tokio::fs::read(audio).await?;
        let file_name = audio
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.wav")
            .to_string();

        log::debug!(
            "stt: uploading {} ({} bytes) to model {}",
            file_name,
            bytes.len(),
            self.config.model
        );

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(audio_mime_type(audio))?;

        let form = multipart::Form::new()
            .part("file", part)
            .text("model", self.config.model.clone())
            .text("language", self.config.language.clone());

        let response = self
            .client
            .post(http::endpoint(&self.config.base_url, "audio/transcriptions"))
            .bearer_auth(api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(SttError::Api {
                status: status.as_u16(),
                message: http::error_message(&body),
            });
        }

        let json: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| SttError::Parse(e.to_string()))?;

        let text = json["text"]
            .as_str()
            .ok_or_else(|| SttError::Parse("missing `text` field".into()))?;

        Ok(text.trim().to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
