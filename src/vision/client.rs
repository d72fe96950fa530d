//! Core `VisionAnalyzer` trait and `GroqVisionClient` implementation.
//!
//! `GroqVisionClient` calls any OpenAI-compatible `/chat/completions`
//! endpoint that accepts `image_url` content parts. All connection details
//! come from [`VisionConfig`]; the key comes from [`Credentials`].

use async_trait::async_trait;
use thiserror::Error;

use crate::config::credentials::GROQ_API_KEY_VAR;
use crate::config::{Credentials, VisionConfig};
use crate::http;
use crate::media::EncodedImage;

// ---------------------------------------------------------------------------
// VisionError
// ---------------------------------------------------------------------------

/// Errors that can occur during image analysis.
#[derive(Debug, Error)]
pub enum VisionError {
    /// No API key was configured for the vision service.
    #[error("{0} is not set")]
    MissingCredential(&'static str),

    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("vision request timed out")]
    Timeout,

    /// The service answered with a non-success status.
    #[error("vision service returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The HTTP response could not be parsed as expected JSON.
    #[error("failed to parse vision response: {0}")]
    Parse(String),

    /// The model returned a response with no usable text content.
    #[error("vision model returned an empty response")]
    EmptyResponse,
}

impl From<reqwest::Error> for VisionError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            VisionError::Timeout
        } else {
            VisionError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// VisionAnalyzer trait
// ---------------------------------------------------------------------------

/// Async trait for multimodal analysis of one image plus one text query.
///
/// # Arguments
/// * `query` – Full text part (persona + transcript, see
///             [`build_query`](crate::vision::build_query)).
/// * `image` – Base64 image embedded inline as a data URI.
#[async_trait]
pub trait VisionAnalyzer: Send + Sync {
    async fn analyze(&self, query: &str, image: &EncodedImage) -> Result<String, VisionError>;
}

// ---------------------------------------------------------------------------
// GroqVisionClient
// ---------------------------------------------------------------------------

/// Single-turn multimodal chat-completions client.
pub struct GroqVisionClient {
    client: reqwest::Client,
    config: VisionConfig,
    api_key: Option<String>,
}

impl GroqVisionClient {
    /// Build a client from config and process-wide credentials.
    pub fn from_config(config: &VisionConfig, credentials: &Credentials) -> Self {
        Self {
            client: http::client_with_timeout(config.timeout_secs),
            config: config.clone(),
            api_key: credentials.groq_api_key.clone(),
        }
    }

    /// Request body: one user message with a text part and an image part.
    fn request_body(&self, query: &str, image: &EncodedImage) -> serde_json::Value {
        serde_json::json!({
            "model": self.config.model,
            "messages": [
                {
                    "role": "user",
                    "content": [
                        { "type": "text", "text": query },
                        { "type": "image_url", "image_url": { "url": image.data_uri() } }
                    ]
                }
            ]
        })
    }
}

#[async_trait]
impl VisionAnalyzer for GroqVisionClient {
    async fn analyze(&self, query: &str, image: &EncodedImage) -> Result<String, VisionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(VisionError::MissingCredential(GROQ_API_KEY_VAR))?;

        log::debug!(
            "vision: sending query ({} chars) and {:?} to model {}",
            query.len(),
            image,
            self.config.model
        );

        let response = self
            .client
            .post(http::endpoint(&self.config.base_url, "chat/completions"))
            .bearer_auth(api_key)
            .json(&self.request_body(query, image))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(VisionError::Api {
                status: status.as_u16(),
                message: http::error_message(&body),
            });
        }

        let json: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| VisionError::Parse(e.to_string()))?;

        let reply = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or(VisionError::EmptyResponse)?;

        if reply.trim().is_empty() {
            return Err(VisionError::EmptyResponse);
        }

        Ok(reply.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
