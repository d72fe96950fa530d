//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across tasks.
//! API keys are deliberately absent here; see [`Credentials`](super::Credentials).

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

/// Groq's OpenAI-compatible API root, shared by transcription and vision.
const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

// ---------------------------------------------------------------------------
// TranscriptionConfig
// ---------------------------------------------------------------------------

/// Settings for the remote speech-to-text client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionConfig {
    /// API root; `/audio/transcriptions` is appended.
    pub base_url: String,
    /// Model identifier (e.g. `"whisper-large-v3"`).
    pub model: String,
    /// ISO-639-1 language hint sent with every request.
    pub language: String,
    /// Maximum seconds to wait for a transcription response.
    pub timeout_secs: u64,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            base_url: GROQ_BASE_URL.into(),
            model: "whisper-large-v3".into(),
            language: "en".into(),
            timeout_secs: 60,
        }
    }
}

// ---------------------------------------------------------------------------
// VisionConfig
// ---------------------------------------------------------------------------

/// Settings for the multimodal chat-completions client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionConfig {
    /// API root; `/chat/completions` is appended.
    pub base_url: String,
    /// Model identifier of a vision-capable chat model.
    pub model: String,
    /// Maximum seconds to wait for the model's reply.
    pub timeout_secs: u64,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            base_url: GROQ_BASE_URL.into(),
            model: "meta-llama/llama-4-scout-17b-16e-instruct".into(),
            timeout_secs: 60,
        }
    }
}

// ---------------------------------------------------------------------------
// SpeechConfig
// ---------------------------------------------------------------------------

/// Primary (cloud) speech synthesis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevenLabsConfig {
    /// API root; `/v1/text-to-speech/{voice_id}` is appended.
    pub base_url: String,
    /// Voice identifier used in the request path.
    pub voice_id: String,
    /// Human-readable voice name, used only in log lines.
    pub voice_name: String,
    /// Synthesis model identifier.
    pub model: String,
    /// Encoding requested from the service (`codec_samplerate_bitrate`).
    pub output_format: String,
    /// Maximum seconds to wait for the audio body.
    pub timeout_secs: u64,
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.elevenlabs.io".into(),
            voice_id: "9BWtsMINqrJLrRacOk9x".into(),
            voice_name: "Aria".into(),
            model: "eleven_turbo_v2".into(),
            output_format: "mp3_22050_32".into(),
            timeout_secs: 30,
        }
    }
}

/// Offline fallback engine settings.
///
/// The engine is invoked as
/// `<program> <voice_flag> <language> <output_flag> <out.ext> <end_of_options> <text>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalEngineConfig {
    /// Executable name or path (e.g. `"espeak-ng"`).
    pub program: String,
    /// Flag that precedes the language/voice (e.g. `"-v"`).
    pub voice_flag: String,
    /// Language passed to the engine.
    pub language: String,
    /// Flag that precedes the output file path (e.g. `"-w"`).
    pub output_flag: String,
    /// Extension of the file the engine writes.
    pub extension: String,
    /// Marker placed before the text so a leading `-` is not read as a flag.
    /// Empty disables it.
    pub end_of_options: String,
}

impl Default for LocalEngineConfig {
    fn default() -> Self {
        Self {
            program: "espeak-ng".into(),
            voice_flag: "-v".into(),
            language: "en".into(),
            output_flag: "-w".into(),
            extension: "wav".into(),
            end_of_options: "--".into(),
        }
    }
}

/// Speech synthesis settings: one primary and one fallback provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub primary: ElevenLabsConfig,
    pub fallback: LocalEngineConfig,
}

// ---------------------------------------------------------------------------
// ServerConfig
// ---------------------------------------------------------------------------

/// Web surface bind address.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 7860,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use voice_of_the_doctor::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
/// assert!(!config.vision.model.is_empty());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory for per-request temporary files. `None` means the system
    /// temp directory.
    pub scratch_dir: Option<PathBuf>,
    pub transcription: TranscriptionConfig,
    pub vision: VisionConfig,
    pub speech: SpeechConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path.
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(original.transcription.model, loaded.transcription.model);
        assert_eq!(original.transcription.language, loaded.transcription.language);
        assert_eq!(original.vision.base_url, loaded.vision.base_url);
        assert_eq!(original.vision.model, loaded.vision.model);
        assert_eq!(original.speech.primary.voice_id, loaded.speech.primary.voice_id);
        assert_eq!(
            original.speech.primary.output_format,
            loaded.speech.primary.output_format
        );
        assert_eq!(original.speech.fallback.program, loaded.speech.fallback.program);
        assert_eq!(original.server.port, loaded.server.port);
        assert!(loaded.scratch_dir.is_none());
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        assert_eq!(config.vision.model, VisionConfig::default().model);
        assert_eq!(config.server.port, 7860);
    }

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.transcription.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(cfg.transcription.model, "whisper-large-v3");
        assert_eq!(cfg.transcription.language, "en");
        assert_eq!(cfg.vision.model, "meta-llama/llama-4-scout-17b-16e-instruct");
        assert_eq!(cfg.speech.primary.voice_name, "Aria");
        assert_eq!(cfg.speech.primary.model, "eleven_turbo_v2");
        assert_eq!(cfg.speech.primary.output_format, "mp3_22050_32");
        assert_eq!(cfg.speech.fallback.program, "espeak-ng");
        assert_eq!(cfg.speech.fallback.language, "en");
        assert_eq!(cfg.speech.fallback.end_of_options, "--");
        assert_eq!(cfg.server.host, "127.0.0.1");
    }

    /// A file that only sets one field keeps defaults everywhere else.
    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("partial.toml");
        std::fs::write(
            &path,
            "scratch_dir = \"/var/tmp/doctor\"\n\n[server]\nport = 9000\n",
        )
        .unwrap();

        let cfg = AppConfig::load_from(&path).expect("load");
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.scratch_dir, Some(PathBuf::from("/var/tmp/doctor")));
        assert_eq!(cfg.transcription.model, "whisper-large-v3");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();

        assert!(AppConfig::load_from(&path).is_err());
    }
}
