//! Speech synthesis module.
//!
//! This module provides:
//! * [`SpeechProvider`]: async trait implemented by every synthesis backend.
//! * [`ElevenLabsProvider`]: cloud voice service (primary).
//! * [`LocalSpeechEngine`]: offline command-line engine (fallback).
//! * [`SpeechSynthesizer`]: runs primary then fallback and never fails.
//! * [`TtsError`]: error variants for synthesis calls.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use voice_of_the_doctor::config::{AppConfig, Credentials};
//! use voice_of_the_doctor::tts::SpeechSynthesizer;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let synth = SpeechSynthesizer::from_config(&config.speech, &Credentials::from_env());
//!
//!     // Some(path) on success, None when both providers failed.
//!     let audio = synth.synthesize("Rest and fluids.", Path::new("reply.mp3")).await;
//!     println!("{audio:?}");
//! }
//! ```

pub mod elevenlabs;
pub mod fallback;
pub mod local;
pub mod provider;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use elevenlabs::ElevenLabsProvider;
pub use fallback::{SpeechSynthesizer, SynthesisState};
pub use local::LocalSpeechEngine;
pub use provider::{SpeechProvider, TtsError};
