//! Cassette Storage Library
//!
//! This crate provides content-addressed filesystem storage for Cassette.
//! Objects are named by their SHA-256 digest, so uploading the same bytes
//! twice always resolves to the same identifier and the second write is
//! skipped.
//!
//! # Identifier format
//!
//! An object identifier is the hex digest (full for media, truncated to
//! twelve characters for transcripts) followed by a file extension taken
//! from the original filename, or derived from the detected media type:
//!
//! - **Media**: `{sha256_hex}{ext}` e.g. `3a7bd3…e2f1.png`
//! - **Transcripts**: `{sha256_hex[..12]}{ext}` e.g. `3a7bd3e2f100.txt`
//!
//! Identifiers must not contain `..`, `/`, or `\`. Validation is
//! centralized in the `naming` module so every lookup path stays
//! consistent.

pub mod digest;
pub mod error;
pub mod naming;
pub mod sniff;
pub mod store;

// Re-export commonly used types
pub use digest::{ContentDigest, DigestAccumulator, TRUNCATED_DIGEST_LEN};
pub use error::{StoreError, StoreResult};
pub use naming::{
    content_type_for_identifier, derive_extension, extension_for_media_type, sanitize_identifier,
    NamingScheme,
};
pub use sniff::{normalize_media_type, sniff_media_type, SNIFF_SAMPLE_LEN};
pub use store::{ObjectStore, RetrievedObject, StoreConfig, StoredObject};
