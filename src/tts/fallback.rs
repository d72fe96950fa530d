//! Two-tier speech synthesis: primary provider, then fallback.
//!
//! [`SpeechSynthesizer`] never returns an error. A missing voice reply is
//! acceptable degraded service, so every provider failure is logged and
//! absorbed here:
//!
//! ```text
//! TryPrimary ──ok──▶ Done(Some(path))
//!     │
//!     └──err (logged)──▶ TryFallback ──ok──▶ Done(Some(path))
//!                              │
//!                              └──err (logged)──▶ Done(None)
//! ```

use std::path::{Path, PathBuf};

use crate::config::{Credentials, SpeechConfig};

use super::elevenlabs::ElevenLabsProvider;
use super::local::LocalSpeechEngine;
use super::provider::SpeechProvider;

/// States of one synthesis attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SynthesisState {
    /// Ask the primary provider.
    TryPrimary,
    /// The primary failed; ask the fallback provider once.
    TryFallback,
    /// Terminal: the produced file, or `None` when both providers failed.
    Done(Option<PathBuf>),
}

impl SynthesisState {
    pub fn is_done(&self) -> bool {
        matches!(self, SynthesisState::Done(_))
    }
}

/// Primary/fallback speech synthesizer.
pub struct SpeechSynthesizer {
    primary: Box<dyn SpeechProvider>,
    fallback: Box<dyn SpeechProvider>,
}

impl SpeechSynthesizer {
    pub fn new(primary: Box<dyn SpeechProvider>, fallback: Box<dyn SpeechProvider>) -> Self {
        Self { primary, fallback }
    }

    /// ElevenLabs first, the local engine second.
    pub fn from_config(config: &SpeechConfig, credentials: &Credentials) -> Self {
        Self::new(
            Box::new(ElevenLabsProvider::from_config(&config.primary, credentials)),
            Box::new(LocalSpeechEngine::from_config(&config.fallback)),
        )
    }

    /// Convert `text` to audio, preferring `out` as the destination.
    ///
    /// Returns the produced file, or `None` if both providers failed.
    pub async fn synthesize(&self, text: &str, out: &Path) -> Option<PathBuf> {
        let mut state = SynthesisState::TryPrimary;
        loop {
            state = match state {
                SynthesisState::TryPrimary => self.try_primary(text, out).await,
                SynthesisState::TryFallback => self.try_fallback(text, out).await,
                SynthesisState::Done(result) => return result,
            };
        }
    }

    async fn try_primary(&self, text: &str, out: &Path) -> SynthesisState {
        match self.primary.synthesize(text, out).await {
            Ok(path) => {
                log::info!("tts: {} wrote {}", self.primary.name(), path.display());
                SynthesisState::Done(Some(path))
            }
            Err(e) => {
                log::warn!(
                    "tts: {} error: {e}. Falling back to {}.",
                    self.primary.name(),
                    self.fallback.name()
                );
                SynthesisState::TryFallback
            }
        }
    }

    async fn try_fallback(&self, text: &str, out: &Path) -> SynthesisState {
        match self.fallback.synthesize(text, out).await {
            Ok(path) => {
                log::info!("tts: {} wrote {}", self.fallback.name(), path.display());
                SynthesisState::Done(Some(path))
            }
            Err(e) => {
                log::error!("tts: {} error: {e}; no audio reply", self.fallback.name());
                SynthesisState::Done(None)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tts::TtsError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Writes `out` with the given extension, counting calls.
    struct Writes {
        ext: &'static str,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl SpeechProvider for Writes {
        fn name(&self) -> &str {
            "writes"
        }

        async fn synthesize(&self, _text: &str, out: &Path) -> Result<PathBuf, TtsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let path = out.with_extension(self.ext);
            std::fs::write(&path, b"audio")?;
            Ok(path)
        }
    }

    /// Always fails, counting calls.
    struct Fails {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl SpeechProvider for Fails {
        fn name(&self) -> &str {
            "fails"
        }

        async fn synthesize(&self, _text: &str, _out: &Path) -> Result<PathBuf, TtsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(TtsError::Request("connection refused".into()))
        }
    }

    fn counter() -> Arc<AtomicUsize> {
        Arc::new(AtomicUsize::new(0))
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn primary_success_skips_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let (p, f) = (counter(), counter());
        let synth = SpeechSynthesizer::new(
            Box::new(Writes { ext: "mp3", calls: p.clone() }),
            Box::new(Writes { ext: "wav", calls: f.clone() }),
        );

        let out = dir.path().join("reply.mp3");
        let result = synth.synthesize("hello", &out).await;

        assert_eq!(result, Some(out));
        assert_eq!(p.load(Ordering::SeqCst), 1);
        assert_eq!(f.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn primary_failure_invokes_fallback_once() {
        let dir = tempfile::tempdir().unwrap();
        let (p, f) = (counter(), counter());
        let synth = SpeechSynthesizer::new(
            Box::new(Fails { calls: p.clone() }),
            Box::new(Writes { ext: "wav", calls: f.clone() }),
        );

        let result = synth.synthesize("hello", &dir.path().join("reply.mp3")).await;

        assert_eq!(result, Some(dir.path().join("reply.wav")));
        assert_eq!(p.load(Ordering::SeqCst), 1);
        assert_eq!(f.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn both_failing_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let (p, f) = (counter(), counter());
        let synth = SpeechSynthesizer::new(
            Box::new(Fails { calls: p.clone() }),
            Box::new(Fails { calls: f.clone() }),
        );

        let result = synth.synthesize("hello", &dir.path().join("reply.mp3")).await;

        assert_eq!(result, None);
        assert_eq!(p.load(Ordering::SeqCst), 1);
        assert_eq!(f.load(Ordering::SeqCst), 1);
    }

    /// Without an ElevenLabs key the configured synthesizer goes straight to
    /// the local engine.
    #[tokio::test]
    async fn configured_without_key_uses_local_engine() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SpeechConfig::default();
        config.fallback.program = "definitely-not-a-speech-engine".into();

        let synth = SpeechSynthesizer::from_config(&config, &Credentials::default());
        let result = synth.synthesize("hello", &dir.path().join("reply.mp3")).await;
        assert_eq!(result, None);
    }

    #[test]
    fn only_done_is_terminal() {
        assert!(!SynthesisState::TryPrimary.is_done());
        assert!(!SynthesisState::TryFallback.is_done());
        assert!(SynthesisState::Done(None).is_done());
    }

    #[test]
    fn synthesizer_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SpeechSynthesizer>();
    }
}
