use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::constants::MEDIA_UPLOAD_FIELD;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::extract_multipart_field;

#[derive(Debug, Serialize, ToSchema)]
pub struct MediaUploadResponse {
    pub success: bool,
    /// Content-derived identifier, full digest plus extension
    pub id: String,
    /// Public URL where the object can be fetched
    pub url: String,
    /// Full hex digest of the object content
    pub hash: String,
}

/// Upload media handler
///
/// Accepts a single multipart field named "file", verifies the content is an
/// allowed image format by sniffing its bytes, and stores it under a
/// content-derived identifier. Re-uploading identical content returns the
/// same identifier without writing a second copy.
///
/// # Errors
/// - `AppError::InvalidInput` - Missing or malformed multipart field
/// - `AppError::PayloadTooLarge` - File exceeds the upload ceiling
/// - `AppError::UnsupportedMediaType` - Content is not an allowed image format
/// - `AppError::Storage` - Storage write failure
#[utoipa::path(
    post,
    path = "/media/upload",
    tag = "media",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Media uploaded successfully", body = MediaUploadResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 415, description = "Unsupported media type", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_media"))]
pub async fn upload_media(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<MediaUploadResponse>, HttpAppError> {
    let (data, original_filename, _content_type) =
        extract_multipart_field(multipart, MEDIA_UPLOAD_FIELD, "No file provided").await?;

    let stored = state
        .media_store
        .ingest(&data, &original_filename)
        .await?;

    if stored.deduplicated {
        tracing::debug!(
            identifier = %stored.identifier,
            "Duplicate media upload resolved to existing object"
        );
    }

    Ok(Json(MediaUploadResponse {
        success: true,
        id: stored.identifier,
        url: stored.url.unwrap_or_default(),
        hash: stored.digest.as_hex().to_string(),
    }))
}
