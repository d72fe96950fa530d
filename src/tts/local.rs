//! Offline speech engine driven through its command line.
//!
//! The default configuration runs `espeak-ng -v en -w <out>.wav -- <text>`.
//! Nothing here touches the network.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;

use crate::config::LocalEngineConfig;

use super::provider::{SpeechProvider, TtsError};

/// Low-dependency fallback provider with a fixed language.
pub struct LocalSpeechEngine {
    config: LocalEngineConfig,
}

impl LocalSpeechEngine {
    pub fn from_config(config: &LocalEngineConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Where the engine writes for a requested `out` path.
    pub fn output_path(&self, out: &Path) -> PathBuf {
        out.with_extension(&self.config.extension)
    }

    fn command(&self, text: &str, target: &Path) -> Command {
        let mut cmd = Command::new(&self.config.program);
        if !self.config.voice_flag.is_empty() {
            cmd.arg(&self.config.voice_flag);
        }
        cmd.arg(&self.config.language);
        if !self.config.output_flag.is_empty() {
            cmd.arg(&self.config.output_flag);
        }
        cmd.arg(target);
        if !self.config.end_of_options.is_empty() {
            cmd.arg(&self.config.end_of_options);
        }
        cmd.arg(text);
        cmd.kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl SpeechProvider for LocalSpeechEngine {
    fn name(&self) -> &str {
        &self.config.program
    }

    async fn synthesize(&self, text: &str, out: &Path) -> Result<PathBuf, TtsError> {
        let target = self.output_path(out);

        let output = self
            .command(text, &target)
            .output()
            .await
            .map_err(|e| {
                TtsError::Engine(format!("failed to start {}: {e}", self.config.program))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TtsError::Engine(format!(
                "{} exited with {}: {}",
                self.config.program,
                output.status,
                stderr.trim()
            )));
        }

        let written = tokio::fs::metadata(&target).await?;
        if written.len() == 0 {
            return Err(TtsError::EmptyAudio);
        }

        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `sh -c <script> -w <out> -- <text>`: `$1` is the output path, `$2` the
    /// marker, `$3` the text.
    #[cfg(unix)]
    fn shell_engine(script: &str) -> LocalSpeechEngine {
        LocalSpeechEngine::from_config(&LocalEngineConfig {
            program: "sh".into(),
            voice_flag: "-c".into(),
            language: script.into(),
            output_flag: "-w".into(),
            extension: "wav".into(),
            end_of_options: "--".into(),
        })
    }

    #[test]
    fn output_path_swaps_extension() {
        let engine = LocalSpeechEngine::from_config(&LocalEngineConfig::default());
        assert_eq!(
            engine.output_path(Path::new("/tmp/doctor-1.mp3")),
            PathBuf::from("/tmp/doctor-1.wav")
        );
    }

    #[test]
    fn default_command_line() {
        let engine = LocalSpeechEngine::from_config(&LocalEngineConfig::default());
        let cmd = engine.command("hello", Path::new("/tmp/o.wav"));
        let std_cmd = cmd.as_std();
        assert_eq!(std_cmd.get_program(), "espeak-ng");
        let args: Vec<_> = std_cmd.get_args().collect();
        assert_eq!(args, ["-v", "en", "-w", "/tmp/o.wav", "--", "hello"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn writes_engine_output() {
        let dir = tempfile::tempdir().unwrap();
        let engine = shell_engine("printf '%s' \"$3\" > \"$1\"");

        let path = engine
            .synthesize("spoken reply", &dir.path().join("reply.mp3"))
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("reply.wav"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "spoken reply");
    }

    /// The engine stops parsing flags at `--`; anything dash-led before it is
    /// rejected the way getopt does.
    #[cfg(unix)]
    #[tokio::test]
    async fn reply_starting_with_dash_is_spoken() {
        let dir = tempfile::tempdir().unwrap();
        let engine = shell_engine(concat!(
            "out=\"$1\"; shift; ",
            "while [ $# -gt 0 ]; do case \"$1\" in ",
            "--) shift; break;; ",
            "-*) echo \"invalid option -- '$1'\" >&2; exit 1;; ",
            "*) break;; esac; done; ",
            "printf '%s' \"$1\" > \"$out\"",
        ));
        let path = engine
            .synthesize("-x rest and fluids", &dir.path().join("reply.mp3"))
            .await
            .unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "-x rest and fluids");
    }

    #[test]
    fn empty_marker_is_omitted() {
        let engine = LocalSpeechEngine::from_config(&LocalEngineConfig {
            end_of_options: String::new(),
            ..LocalEngineConfig::default()
        });
        let cmd = engine.command("hello", Path::new("/tmp/o.wav"));
        let args: Vec<_> = cmd.as_std().get_args().collect();
        assert_eq!(args, ["-v", "en", "-w", "/tmp/o.wav", "hello"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_engine_error() {
        let dir = tempfile::tempdir().unwrap();
        let engine = shell_engine("echo 'no voices installed' >&2; exit 3");

        let err = engine
            .synthesize("x", &dir.path().join("reply.mp3"))
            .await
            .unwrap_err();

        match err {
            TtsError::Engine(msg) => assert!(msg.contains("no voices installed")),
            other => panic!("expected Engine error, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn empty_output_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let engine = shell_engine(": > \"$1\"");

        let err = engine
            .synthesize("x", &dir.path().join("reply.mp3"))
            .await
            .unwrap_err();
        assert!(matches!(err, TtsError::EmptyAudio));
    }

    #[tokio::test]
    async fn missing_program_is_engine_error() {
        let dir = tempfile::tempdir().unwrap();
        let engine = LocalSpeechEngine::from_config(&LocalEngineConfig {
            program: "definitely-not-a-speech-engine".into(),
            ..LocalEngineConfig::default()
        });

        let err = engine
            .synthesize("x", &dir.path().join("reply.mp3"))
            .await
            .unwrap_err();
        assert!(matches!(err, TtsError::Engine(_)));
    }
}
