use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::constants::TRANSCRIPT_UPLOAD_FIELD;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::extract_multipart_field;

#[derive(Debug, Serialize, ToSchema)]
pub struct TranscriptUploadResponse {
    /// Truncated content digest, without extension
    pub id: String,
    /// Stored filename, the id plus the original file's extension
    pub filename: String,
}

/// Upload transcript handler
///
/// Accepts a single multipart field named "transcript" and stores it under a
/// truncated content-derived identifier. Any content type is accepted;
/// transcripts are not sniffed or gated.
///
/// # Errors
/// - `AppError::InvalidInput` - Missing or malformed multipart field
/// - `AppError::PayloadTooLarge` - File exceeds the upload ceiling
/// - `AppError::Storage` - Storage write failure
#[utoipa::path(
    post,
    path = "/transcript/upload",
    tag = "transcripts",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Transcript uploaded successfully", body = TranscriptUploadResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_transcript"))]
pub async fn upload_transcript(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<TranscriptUploadResponse>, HttpAppError> {
    let (data, original_filename, _content_type) = extract_multipart_field(
        multipart,
        TRANSCRIPT_UPLOAD_FIELD,
        "No transcript file provided",
    )
    .await?;

    let stored = state
        .transcript_store
        .ingest(&data, &original_filename)
        .await?;

    if stored.deduplicated {
        tracing::debug!(
            identifier = %stored.identifier,
            "Duplicate transcript upload resolved to existing object"
        );
    }

    Ok(Json(TranscriptUploadResponse {
        id: stored.digest.truncated().to_string(),
        filename: stored.identifier,
    }))
}
