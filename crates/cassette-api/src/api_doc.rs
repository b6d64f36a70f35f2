//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;

/// Returns the OpenAPI spec served at /api/openapi.json.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cassette API",
        version = "0.1.0",
        description = "Content-addressed media and transcript storage. Uploads are deduplicated by content digest; media is sniff-validated against an image allow-list and served under immutable cache headers."
    ),
    paths(
        handlers::media_upload::upload_media,
        handlers::media_get::get_media,
        handlers::transcript_upload::upload_transcript,
    ),
    components(
        schemas(
            handlers::media_upload::MediaUploadResponse,
            handlers::transcript_upload::TranscriptUploadResponse,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "media", description = "Image upload and retrieval by content-derived identifier"),
        (name = "transcripts", description = "Transcript upload operations")
    )
)]
pub struct ApiDoc;
