//! Shared HTTP plumbing for the remote service clients.

use std::time::Duration;

/// Build a `reqwest::Client` with a per-request timeout.
///
/// A default (no-timeout) client is used as a last-resort fallback if the
/// builder fails.
pub fn client_with_timeout(timeout_secs: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Join an API root and a path without doubling the slash.
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Pull a human-readable message out of an error response body.
///
/// Understands the OpenAI shape (`{"error":{"message":..}}`) and the
/// ElevenLabs shape (`{"detail":{"message":..}}` or `{"detail":".."}`);
/// anything else is returned as the raw body.
pub fn error_message(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };
    let candidates = [
        &json["error"]["message"],
        &json["detail"]["message"],
        &json["detail"],
        &json["error"],
        &json["message"],
    ];
    candidates
        .iter()
        .find_map(|v| v.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| body.trim().to_string())
}
