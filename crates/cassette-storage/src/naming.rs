//! Object naming
//!
//! Identifier construction and validation live here so ingest and
//! retrieval stay consistent. Two fixed tables map between media types
//! and extensions: one picks an extension for a sniffed type at ingest,
//! the other picks a response content type from an identifier's
//! extension at retrieval. They are intentionally separate, retrieval
//! never re-reads stored bytes.

use crate::digest::ContentDigest;
use crate::error::{StoreError, StoreResult};

/// How much of the content digest an identifier carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingScheme {
    /// The full 64-character hex digest.
    FullDigest,
    /// The leading [`crate::TRUNCATED_DIGEST_LEN`] characters.
    TruncatedDigest,
}

impl NamingScheme {
    /// The digest portion of an identifier under this scheme.
    pub fn digest_part<'a>(&self, digest: &'a ContentDigest) -> &'a str {
        match self {
            NamingScheme::FullDigest => digest.as_hex(),
            NamingScheme::TruncatedDigest => digest.truncated(),
        }
    }
}

/// Extension assigned at ingest when the original filename has none.
pub fn extension_for_media_type(media_type: &str) -> Option<&'static str> {
    match media_type {
        "image/jpeg" => Some(".jpg"),
        "image/png" => Some(".png"),
        "image/gif" => Some(".gif"),
        "image/webp" => Some(".webp"),
        "image/svg+xml" => Some(".svg"),
        _ => None,
    }
}

/// Response content type for a stored identifier, by extension alone.
pub fn content_type_for_identifier(identifier: &str) -> &'static str {
    let ext = filename_extension(identifier)
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        ".jpg" | ".jpeg" => "image/jpeg",
        ".png" => "image/png",
        ".gif" => "image/gif",
        ".webp" => "image/webp",
        ".svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Extension for a new object: the original filename's extension when it
/// has one (case preserved), otherwise one derived from the detected
/// media type, otherwise empty.
pub fn derive_extension(original_filename: &str, media_type: &str) -> String {
    if let Some(ext) = filename_extension(original_filename) {
        return ext.to_string();
    }
    extension_for_media_type(media_type)
        .unwrap_or_default()
        .to_string()
}

/// Validate an identifier before it touches the filesystem.
///
/// Identifiers are single path segments. Anything that could traverse
/// out of the storage root is rejected here, before any path is built.
pub fn sanitize_identifier(identifier: &str) -> StoreResult<&str> {
    if identifier.is_empty() {
        return Err(StoreError::InvalidIdentifier(
            "Identifier must not be empty".to_string(),
        ));
    }
    if identifier.contains("..") || identifier.contains('/') || identifier.contains('\\') {
        return Err(StoreError::InvalidIdentifier(
            "Identifier contains invalid characters".to_string(),
        ));
    }
    Ok(identifier)
}

/// Extension of the last path segment, including the dot.
///
/// A trailing bare dot does not count as an extension.
fn filename_extension(filename: &str) -> Option<&str> {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let idx = name.rfind('.')?;
    let ext = &name[idx..];
    if ext.len() > 1 {
        Some(ext)
    } else {
        None
    }
}
