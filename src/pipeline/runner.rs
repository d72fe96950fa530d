//! Session orchestrator: drives transcription, image analysis and speech
//! synthesis for one consultation.
//!
//! # Pipeline flow
//!
//! ```text
//! process(audio?, image?)
//!   ├─ audio?  → stt.transcribe            ok → text | err → "Error transcribing audio: …"
//!   ├─ image?  → copy (scoped) → encode → vision.analyze(persona + " " + transcript)
//!   │            copy err → "Error processing image: …"
//!   │            encode err → "Error encoding image for analysis"
//!   │            vision err → "Error analyzing image: …"
//!   │  no image → "No image provided for analysis. Please upload an image."
//!   └─ Genuine → speech.synthesize(reply, scoped .mp3) → Some(path) | None
//! ```
//!
//! Steps run one after another; each failure is logged and converted into a
//! displayable value, so [`SessionOrchestrator::process`] cannot fail.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{AppConfig, Credentials};
use crate::media::{encode_image, ScratchSpace};
use crate::stt::{GroqTranscriber, Transcriber};
use crate::tts::SpeechSynthesizer;
use crate::vision::{build_query, GroqVisionClient, VisionAnalyzer};

use super::outcome::{
    analysis_failed, image_processing_failed, transcription_failed, Analysis, SessionOutput,
    ENCODE_FAILED, NO_AUDIO_PROVIDED,
};

// ---------------------------------------------------------------------------
// SessionOrchestrator
// ---------------------------------------------------------------------------

/// Stateless driver for one request at a time; share it behind an `Arc`.
///
/// ```rust,no_run
/// use voice_of_the_doctor::config::{AppConfig, Credentials};
/// use voice_of_the_doctor::pipeline::SessionOrchestrator;
///
/// # async fn example() {
/// let orchestrator =
///     SessionOrchestrator::from_config(&AppConfig::default(), &Credentials::default());
/// let out = orchestrator.process(None, None).await;
/// assert_eq!(out.transcript, "No audio provided");
/// assert!(out.audio.is_none());
/// # }
/// ```
pub struct SessionOrchestrator {
    stt: Arc<dyn Transcriber>,
    vision: Arc<dyn VisionAnalyzer>,
    speech: SpeechSynthesizer,
    scratch: ScratchSpace,
}

impl SessionOrchestrator {
    /// Create an orchestrator from explicit components.
    ///
    /// # Arguments
    ///
    /// * `stt`    : speech-to-text client (e.g. `GroqTranscriber`).
    /// * `vision` : multimodal client (e.g. `GroqVisionClient`).
    /// * `speech` : primary/fallback synthesizer.
    /// * `scratch`: where image copies and audio replies are created.
    pub fn new(
        stt: Arc<dyn Transcriber>,
        vision: Arc<dyn VisionAnalyzer>,
        speech: SpeechSynthesizer,
        scratch: ScratchSpace,
    ) -> Self {
        Self {
            stt,
            vision,
            speech,
            scratch,
        }
    }

    /// Build the production component set from config and credentials.
    pub fn from_config(config: &AppConfig, credentials: &Credentials) -> Self {
        Self::new(
            Arc::new(GroqTranscriber::from_config(&config.transcription, credentials)),
            Arc::new(GroqVisionClient::from_config(&config.vision, credentials)),
            SpeechSynthesizer::from_config(&config.speech, credentials),
            ScratchSpace::new(config.scratch_dir.clone()),
        )
    }

    pub fn scratch(&self) -> &ScratchSpace {
        &self.scratch
    }

    // -----------------------------------------------------------------------
    // Entry point
    // -----------------------------------------------------------------------

    /// Run one consultation.
    ///
    /// Both inputs are caller-owned and never modified. The returned audio
    /// file, if any, belongs to the caller.
    pub async fn process(&self, audio: Option<&Path>, image: Option<&Path>) -> SessionOutput {
        let transcript = match audio {
            Some(path) => self.transcribe(path).await,
            None => NO_AUDIO_PROVIDED.to_string(),
        };

        let analysis = match image {
            Some(path) => self.analyze(path, &transcript).await,
            None => Analysis::Missing,
        };

        let audio = self.speak(&analysis).await;

        SessionOutput {
            transcript,
            analysis,
            audio,
        }
    }

    // -----------------------------------------------------------------------
    // Steps
    // -----------------------------------------------------------------------

    async fn transcribe(&self, audio: &Path) -> String {
        log::debug!("session: transcribing {}", audio.display());
        match self.stt.transcribe(audio).await {
            Ok(text) => {
                log::info!("session: transcript = {text:?}");
                text
            }
            Err(e) => {
                log::warn!("session: transcription failed: {e}");
                transcription_failed(e)
            }
        }
    }

    async fn analyze(&self, image: &Path, transcript: &str) -> Analysis {
        // The copy lives until the end of this function on every path.
        let copy = match self.scratch.copy_image(image).await {
            Ok(copy) => copy,
            Err(e) => {
                log::warn!("session: could not copy {}: {e}", image.display());
                return Analysis::Failed(image_processing_failed(e));
            }
        };

        let analysis = self.analyze_copy(copy.path(), transcript).await;
        drop(copy);
        analysis
    }

    /// Encode the private copy and ask the vision model about it.
    async fn analyze_copy(&self, copy: &Path, transcript: &str) -> Analysis {
        let encoded = match encode_image(copy).await {
            Ok(encoded) => encoded,
            Err(e) => {
                log::warn!("session: could not encode {}: {e}", copy.display());
                return Analysis::Failed(ENCODE_FAILED.to_string());
            }
        };

        match self.vision.analyze(&build_query(transcript), &encoded).await {
            Ok(reply) => Analysis::Genuine(reply),
            Err(e) => {
                log::warn!("session: image analysis failed: {e}");
                Analysis::Failed(analysis_failed(e))
            }
        }
    }

    async fn speak(&self, analysis: &Analysis) -> Option<PathBuf> {
        let Analysis::Genuine(reply) = analysis else {
            log::debug!("session: no genuine analysis, skipping speech");
            return None;
        };

        let placeholder = match self.scratch.audio_output() {
            Ok(file) => file,
            Err(e) => {
                log::error!("session: could not allocate audio output: {e}");
                return None;
            }
        };

        // On `None` the placeholder is dropped and deleted.
        let produced = self.speech.synthesize(reply, placeholder.path()).await?;

        if produced == placeholder.path() {
            match placeholder.keep() {
                Ok(path) => Some(path),
                Err(e) => {
                    log::error!("session: could not keep audio reply: {e}");
                    None
                }
            }
        } else {
            // A provider wrote elsewhere (e.g. `.wav`); the empty placeholder goes.
            Some(produced)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
