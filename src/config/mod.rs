//! Configuration module.
//!
//! Provides `AppConfig` (TOML-persisted settings for every remote client and
//! the web surface), `Credentials` (API keys read from the environment once
//! at startup) and `AppPaths` for cross-platform config directories.

pub mod credentials;
pub mod paths;
pub mod settings;

pub use credentials::Credentials;
pub use paths::AppPaths;
pub use settings::{
    AppConfig, ElevenLabsConfig, LocalEngineConfig, ServerConfig, SpeechConfig,
    TranscriptionConfig, VisionConfig,
};
