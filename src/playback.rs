//! Local playback of a synthesised reply through the platform's player.
//!
//! | OS      | `.mp3`                      | other            |
//! |---------|-----------------------------|------------------|
//! | macOS   | `afplay`                    | `afplay`         |
//! | Linux   | `mpg123`                    | `aplay`          |
//! | Windows | PowerShell `MediaPlayer`    | `SoundPlayer`    |

use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("unsupported operating system: {0}")]
    Unsupported(String),

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    Failed { program: String, status: String },
}

/// Program and arguments that play `path` on `os` (`std::env::consts::OS`).
pub fn player_for(os: &str, path: &Path) -> Option<(String, Vec<String>)> {
    let file = path.display().to_string();
    let is_mp3 = path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("mp3"));

    match os {
        "macos" => Some(("afplay".into(), vec![file])),
        "linux" if is_mp3 => Some(("mpg123".into(), vec![file])),
        "linux" => Some(("aplay".into(), vec![file])),
        "windows" if is_mp3 => Some((
            "powershell".into(),
            vec![
                "-c".into(),
                format!(
                    "Add-Type -AssemblyName presentationCore; \
                     $player = New-Object System.Windows.Media.MediaPlayer; \
                     $player.Open([System.Uri]::new((Resolve-Path \"{file}\").Path)); \
                     $player.Play(); Start-Sleep -Seconds 5"
                ),
            ],
        )),
        "windows" => Some((
            "powershell".into(),
            vec![
                "-c".into(),
                format!("(New-Object Media.SoundPlayer \"{file}\").PlaySync();"),
            ],
        )),
        _ => None,
    }
}

/// Play `path` and wait for the player to exit.
pub async fn play(path: &Path) -> Result<(), PlaybackError> {
    let os = std::env::consts::OS;
    let (program, args) =
        player_for(os, path).ok_or_else(|| PlaybackError::Unsupported(os.to_string()))?;

    log::debug!("playback: {program} {args:?}");

    let status = tokio::process::Command::new(&program)
        .args(&args)
        .status()
        .await
        .map_err(|source| PlaybackError::Spawn {
            program: program.clone(),
            source,
        })?;

    if !status.success() {
        return Err(PlaybackError::Failed {
            program,
            status: status.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linux_picks_player_by_extension() {
        let (program, args) = player_for("linux", Path::new("/tmp/r.mp3")).unwrap();
        assert_eq!(program, "mpg123");
        assert_eq!(args, vec!["/tmp/r.mp3".to_string()]);

        let (program, _) = player_for("linux", Path::new("/tmp/r.wav")).unwrap();
        assert_eq!(program, "aplay");
    }

    #[test]
    fn macos_uses_afplay() {
        let (program, _) = player_for("macos", Path::new("r.wav")).unwrap();
        assert_eq!(program, "afplay");
    }

    #[test]
    fn windows_uses_powershell() {
        let (program, args) = player_for("windows", Path::new("r.MP3")).unwrap();
        assert_eq!(program, "powershell");
        assert!(args[1].contains("MediaPlayer"));

        let (_, args) = player_for("windows", Path::new("r.wav")).unwrap();
        assert!(args[1].contains("SoundPlayer"));
    }

    #[test]
    fn unknown_os_is_unsupported() {
        assert!(player_for("haiku", Path::new("r.mp3")).is_none());
    }
}
