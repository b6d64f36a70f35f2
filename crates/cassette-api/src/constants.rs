//! API constants

/// Multipart field name for media uploads.
pub const MEDIA_UPLOAD_FIELD: &str = "file";

/// Multipart field name for transcript uploads.
pub const TRANSCRIPT_UPLOAD_FIELD: &str = "transcript";

/// Cache policy for served media. Identifiers are content-derived, so the
/// bytes behind one can never change.
pub const MEDIA_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";
