//! Session orchestrator module.
//!
//! This module wires one consultation: audio → transcript, image + transcript
//! → doctor reply, reply → speech. Every step degrades to a displayable
//! value instead of failing the request.
//!
//! # Architecture
//!
//! ```text
//! SessionOrchestrator::process(audio?, image?)
//!        │
//!        ├─ audio?  Transcriber::transcribe          → transcript | error text
//!        ├─ image?  ScratchSpace::copy_image (scoped)
//!        │            └─ encode_image → VisionAnalyzer::analyze(persona + " " + transcript)
//!        │          (copy deleted here on every path)
//!        └─ Genuine analysis?
//!                   ScratchSpace::audio_output (scoped)
//!                     └─ SpeechSynthesizer::synthesize → Some(path) | None
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use voice_of_the_doctor::config::{AppConfig, Credentials};
//! use voice_of_the_doctor::pipeline::SessionOrchestrator;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let orchestrator = SessionOrchestrator::from_config(&config, &Credentials::from_env());
//!
//!     let out = orchestrator
//!         .process(Some(Path::new("question.wav")), Some(Path::new("rash.jpg")))
//!         .await;
//!     println!("{}\n{}\n{:?}", out.transcript, out.analysis, out.audio);
//! }
//! ```

pub mod outcome;
pub mod runner;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use outcome::{Analysis, SessionOutput, NO_AUDIO_PROVIDED, NO_IMAGE_PROVIDED};
pub use runner::SessionOrchestrator;
