//! Per-request results and the sentinel texts that keep the response shape
//! stable when a step is skipped or fails.

use std::path::PathBuf;

/// Transcript used when no audio was supplied.
pub const NO_AUDIO_PROVIDED: &str = "No audio provided";

/// Analysis text used when no image was supplied.
pub const NO_IMAGE_PROVIDED: &str = "No image provided for analysis. Please upload an image.";

/// Analysis text used when the image copy could not be encoded.
pub const ENCODE_FAILED: &str = "Error encoding image for analysis";

/// Transcript text for a failed transcription.
pub fn transcription_failed(reason: impl std::fmt::Display) -> String {
    format!("Error transcribing audio: {reason}")
}

/// Analysis text for a failed image copy.
pub fn image_processing_failed(reason: impl std::fmt::Display) -> String {
    format!("Error processing image: {reason}")
}

/// Analysis text for a failed vision call.
pub fn analysis_failed(reason: impl std::fmt::Display) -> String {
    format!("Error analyzing image: {reason}")
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

/// Outcome of the image step.
///
/// Only [`Analysis::Genuine`] is ever spoken back to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Analysis {
    /// The model's reply, verbatim.
    Genuine(String),
    /// No image was supplied.
    Missing,
    /// Copy, encode or service failure; holds the display text.
    Failed(String),
}

impl Analysis {
    /// Text shown to the user.
    pub fn text(&self) -> &str {
        match self {
            Analysis::Genuine(text) | Analysis::Failed(text) => text,
            Analysis::Missing => NO_IMAGE_PROVIDED,
        }
    }

    pub fn is_genuine(&self) -> bool {
        matches!(self, Analysis::Genuine(_))
    }
}

impl std::fmt::Display for Analysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

// ---------------------------------------------------------------------------
// SessionOutput
// ---------------------------------------------------------------------------

/// The triple returned for every consultation, whatever failed on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutput {
    /// Transcribed question, or a sentinel / error text.
    pub transcript: String,
    pub analysis: Analysis,
    /// Synthesised reply. Ownership of the file passes to the caller.
    pub audio: Option<PathBuf>,
}

impl SessionOutput {
    pub fn analysis_text(&self) -> &str {
        self.analysis.text()
    }
}
