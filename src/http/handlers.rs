use super::error::ApiError;
use super::state::AppState;
use crate::pipeline::RawAudioUpload;
use crate::speech::TranscriptOutcome;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use tracing::{error, info, Instrument};

/// Multipart field carrying the audio
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub transcript: TranscriptOutcome,
}

/// POST /transcribe
/// Transcribe one uploaded clip
pub async fn transcribe(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TranscriptResponse>, ApiError> {
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("transcribe", %request_id);

    async move {
        let multipart = multipart.map_err(|e| {
            error!("Rejected upload: {}", e);
            ApiError::invalid_upload(e.body_text())
        })?;
        let upload = read_upload(multipart).await?;

        info!(
            "Received file: {:?} ({:?}, {} bytes)",
            upload.file_name,
            upload.content_type,
            upload.bytes.len()
        );

        match state.pipeline.transcribe(upload).await {
            Ok(transcript) => {
                info!("Transcription complete");
                Ok(Json(TranscriptResponse { transcript }))
            }
            Err(e) => {
                error!("Transcription failed: {}", e);
                Err(ApiError::from(e))
            }
        }
    }
    .instrument(span)
    .await
}

/// Pull the `file` field out of the form; other fields are ignored.
async fn read_upload(mut multipart: Multipart) -> Result<RawAudioUpload, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error!("Failed to read multipart body: {}", e);
        ApiError::invalid_upload(e.body_text())
    })? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(|e| {
            error!("Failed to read uploaded file: {}", e);
            ApiError::invalid_upload(e.body_text())
        })?;

        return Ok(RawAudioUpload {
            bytes: bytes.to_vec(),
            file_name,
            content_type,
        });
    }

    Err(ApiError::invalid_upload(format!(
        "missing multipart field '{}'",
        FILE_FIELD
    )))
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
