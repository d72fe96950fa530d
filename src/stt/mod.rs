//! Speech-to-text client module.
//!
//! [`Transcriber`] is the object-safe interface used by the session
//! orchestrator. [`GroqTranscriber`] is the production implementation that
//! uploads the whole audio file to an OpenAI-compatible
//! `/audio/transcriptions` endpoint.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use voice_of_the_doctor::config::{AppConfig, Credentials};
//! use voice_of_the_doctor::stt::{GroqTranscriber, Transcriber};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let creds = Credentials::from_env();
//!     let stt = GroqTranscriber::from_config(&config.transcription, &creds);
//!
//!     let text = stt.transcribe(Path::new("question.wav")).await.unwrap();
//!     println!("{text}");
//! }
//! ```

pub mod client;

pub use client::{audio_mime_type, GroqTranscriber, SttError, Transcriber};
