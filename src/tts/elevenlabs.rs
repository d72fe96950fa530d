//! ElevenLabs text-to-speech provider.
//!
//! `POST {base_url}/v1/text-to-speech/{voice_id}?output_format=...` with the
//! `xi-api-key` header; the response body is the encoded audio.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::config::credentials::ELEVEN_API_KEY_VAR;
use crate::config::{Credentials, ElevenLabsConfig};
use crate::http;

use super::provider::{SpeechProvider, TtsError};

/// Premium cloud voice with a fixed voice identity and encoding.
pub struct ElevenLabsProvider {
    client: reqwest::Client,
    config: ElevenLabsConfig,
    api_key: Option<String>,
}

impl ElevenLabsProvider {
    pub fn from_config(config: &ElevenLabsConfig, credentials: &Credentials) -> Self {
        Self {
            client: http::client_with_timeout(config.timeout_secs),
            config: config.clone(),
            api_key: credentials.elevenlabs_api_key.clone(),
        }
    }

    /// Whether a key is configured. Without one every call fails fast.
    pub fn is_available(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl SpeechProvider for ElevenLabsProvider {
    fn name(&self) -> &str {
        "elevenlabs"
    }

    async fn synthesize(&self, text: &str, out: &Path) -> Result<PathBuf, TtsError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(TtsError::MissingCredential(ELEVEN_API_KEY_VAR))?;

        let url = http::endpoint(
            &self.config.base_url,
            &format!("v1/text-to-speech/{}", self.config.voice_id),
        );

        log::debug!(
            "tts: elevenlabs voice={} model={} format={}",
            self.config.voice_name,
            self.config.model,
            self.config.output_format
        );

        let response = self
            .client
            .post(url)
            .query(&[("output_format", self.config.output_format.as_str())])
            .header("xi-api-key", api_key)
            .json(&serde_json::json!({
                "text": text,
                "model_id": self.config.model,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TtsError::Api {
                status: status.as_u16(),
                message: http::error_message(&body),
            });
        }

        let audio = response.bytes().await?;
        if audio.is_empty() {
            return Err(TtsError::EmptyAudio);
        }

        tokio::fs::write(out, &audio).await?;
        Ok(out.to_path_buf())
    }
}
