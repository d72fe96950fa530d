//! API credentials, read from the environment once at startup.
//!
//! Keys never live in `settings.toml`. [`Credentials::from_env`] loads an
//! optional `.env` file first (via `dotenvy`) so local development works
//! without exporting anything.

/// Environment variable holding the Groq key (transcription + vision).
pub const GROQ_API_KEY_VAR: &str = "GROQ_API_KEY";
/// Environment variable holding the ElevenLabs key (primary synthesis).
pub const ELEVEN_API_KEY_VAR: &str = "ELEVEN_API_KEY";

/// Process-wide API keys, passed by reference into each client constructor.
///
/// Empty strings are treated the same as unset variables.
#[derive(Clone, Default)]
pub struct Credentials {
    pub groq_api_key: Option<String>,
    pub elevenlabs_api_key: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Only presence is printed; key material stays out of logs.
        f.debug_struct("Credentials")
            .field("groq_api_key", &self.groq_api_key.as_ref().map(|_| "<set>"))
            .field(
                "elevenlabs_api_key",
                &self.elevenlabs_api_key.as_ref().map(|_| "<set>"),
            )
            .finish()
    }
}

impl Credentials {
    /// Load `.env` (if present) and read both keys from the environment.
    pub fn from_env() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => log::debug!("loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => log::warn!("ignoring unreadable .env file: {e}"),
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build credentials from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            groq_api_key: non_empty(GROQ_API_KEY_VAR),
            elevenlabs_api_key: non_empty(ELEVEN_API_KEY_VAR),
        }
    }

    /// Log the startup warnings for missing keys. Never fails.
    pub fn report(&self) {
        if self.groq_api_key.is_none() {
            log::warn!(
                "{GROQ_API_KEY_VAR} not found in environment; transcription and image analysis will fail"
            );
        }
        match self.elevenlabs_api_key {
            Some(_) => log::info!("ElevenLabs available: true"),
            None => log::info!(
                "{ELEVEN_API_KEY_VAR} not set; speech synthesis will use the local fallback engine"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn reads_both_keys() {
        let creds = Credentials::from_lookup(lookup_from(&[
            (GROQ_API_KEY_VAR, "gsk-1"),
            (ELEVEN_API_KEY_VAR, "el-2"),
        ]));
        assert_eq!(creds.groq_api_key.as_deref(), Some("gsk-1"));
        assert_eq!(creds.elevenlabs_api_key.as_deref(), Some("el-2"));
    }

    #[test]
    fn empty_values_count_as_missing() {
        let creds = Credentials::from_lookup(lookup_from(&[
            (GROQ_API_KEY_VAR, ""),
            (ELEVEN_API_KEY_VAR, "   "),
        ]));
        assert!(creds.groq_api_key.is_none());
        assert!(creds.elevenlabs_api_key.is_none());
    }

    #[test]
    fn debug_output_hides_keys() {
        let creds = Credentials::from_lookup(lookup_from(&[(GROQ_API_KEY_VAR, "gsk-secret")]));
        let printed = format!("{creds:?}");
        assert!(!printed.contains("gsk-secret"));
        assert!(printed.contains("<set>"));
    }
}
