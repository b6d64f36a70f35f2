use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use cassette_core::AppError;
use futures::StreamExt;

use crate::constants::MEDIA_CACHE_CONTROL;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Serve a stored media object by its content-derived identifier.
///
/// The content type is derived from the identifier's extension, not from the
/// stored bytes. Responses carry an immutable cache policy because the bytes
/// behind an identifier can never change.
#[utoipa::path(
    get,
    path = "/media/{id}",
    tag = "media",
    params(
        ("id" = String, Path, description = "Content-derived object identifier")
    ),
    responses(
        (status = 200, description = "Media content", content_type = "application/octet-stream"),
        (status = 400, description = "Invalid identifier", body = ErrorResponse),
        (status = 404, description = "Media not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "get_media", media_id = %id))]
pub async fn get_media(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, HttpAppError> {
    let retrieved = state.media_store.retrieve(&id).await?;

    let body_stream = retrieved.stream.map(|result| {
        result.map_err(|e| std::io::Error::other(format!("Storage stream error: {}", e)))
    });

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, retrieved.content_type)
        .header(header::CACHE_CONTROL, MEDIA_CACHE_CONTROL)
        .body(Body::from_stream(body_stream))
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build response");
            HttpAppError::from(AppError::Internal(e.to_string()))
        })?;

    Ok(response)
}
