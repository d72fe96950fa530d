//! `POST /api/consult`: multipart upload in, transcript/analysis/audio out.
//!
//! Uploaded parts are written to scoped files (deleted when the handler
//! returns). The synthesised reply is owned by the handler: it is inlined as
//! base64 and removed from disk.

use std::path::Path;
use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;

use crate::media::{ScopedFile, ScratchSpace};
use crate::pipeline::SessionOrchestrator;
use crate::stt::audio_mime_type;

/// Inline audio reply.
#[derive(Debug, Serialize)]
pub struct AudioPayload {
    pub mime_type: &'static str,
    pub data_base64: String,
}

/// JSON body returned by the consult endpoint.
#[derive(Debug, Serialize)]
pub struct ConsultResponse {
    pub transcript: String,
    pub analysis: String,
    pub audio: Option<AudioPayload>,
}

type HandlerError = (StatusCode, String);

fn bad_request(e: impl std::fmt::Display) -> HandlerError {
    (StatusCode::BAD_REQUEST, e.to_string())
}

fn internal(e: impl std::fmt::Display) -> HandlerError {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

/// `.ext` from the client's file name, or `default` if it has none usable.
fn upload_suffix(file_name: Option<&str>, default: &str) -> String {
    file_name
        .and_then(|n| Path::new(n).extension())
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.len() <= 5 && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_else(|| default.to_string())
}

async fn store(
    scratch: &ScratchSpace,
    suffix: &str,
    bytes: &[u8],
) -> Result<ScopedFile, HandlerError> {
    scratch.write(suffix, bytes).await.map_err(internal)
}

/// Read the reply into memory and delete it.
async fn take_audio(path: &Path) -> Option<AudioPayload> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            log::error!("consult: could not read audio reply {}: {e}", path.display());
            return None;
        }
    };
    if let Err(e) = tokio::fs::remove_file(path).await {
        log::warn!("consult: could not remove {}: {e}", path.display());
    }
    Some(AudioPayload {
        mime_type: audio_mime_type(path),
        data_base64: STANDARD.encode(bytes),
    })
}

pub async fn consult_handler(
    State(orchestrator): State<Arc<SessionOrchestrator>>,
    mut multipart: Multipart,
) -> Result<Json<ConsultResponse>, HandlerError> {
    let scratch = orchestrator.scratch();
    let mut audio: Option<ScopedFile> = None;
    let mut image: Option<ScopedFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.map_err(bad_request)?;

        if bytes.is_empty() {
            continue;
        }

        match name.as_str() {
            "audio" => {
                let suffix = upload_suffix(file_name.as_deref(), ".webm");
                audio = Some(store(scratch, &suffix, &bytes).await?);
            }
            "image" => {
                let suffix = upload_suffix(file_name.as_deref(), ".jpg");
                image = Some(store(scratch, &suffix, &bytes).await?);
            }
            other => log::debug!("consult: ignoring form field {other:?}"),
        }
    }

    log::info!(
        "consult: audio={} image={}",
        audio.is_some(),
        image.is_some()
    );

    let output = orchestrator
        .process(
            audio.as_ref().map(ScopedFile::path),
            image.as_ref().map(ScopedFile::path),
        )
        .await;

    let audio_reply = match &output.audio {
        Some(path) => take_audio(path).await,
        None => None,
    };

    Ok(Json(ConsultResponse {
        analysis: output.analysis_text().to_string(),
        transcript: output.transcript,
        audio: audio_reply,
    }))
}
