//! Object store setup and initialization

use anyhow::Result;
use cassette_core::Config;
use cassette_storage::{NamingScheme, ObjectStore, StoreConfig};

/// Setup the media and transcript stores from application configuration.
///
/// Media objects are named by their full digest and gated to the allowed
/// image types; transcripts use truncated digests and accept anything.
pub async fn setup_stores(config: &Config) -> Result<(ObjectStore, ObjectStore)> {
    tracing::info!("Initializing object stores...");

    let media_store = ObjectStore::new(StoreConfig {
        root: config.media_storage_path.clone().into(),
        base_url: Some(config.media_base_url.clone()),
        max_object_bytes: config.max_upload_size_bytes as u64,
        allowed_media_types: Some(config.allowed_media_types.clone()),
        naming: NamingScheme::FullDigest,
    })
    .await?;

    let transcript_store = ObjectStore::new(StoreConfig {
        root: config.transcript_storage_path.clone().into(),
        base_url: None,
        max_object_bytes: config.max_upload_size_bytes as u64,
        allowed_media_types: None,
        naming: NamingScheme::TruncatedDigest,
    })
    .await?;

    tracing::info!(
        media_root = %config.media_storage_path,
        transcript_root = %config.transcript_storage_path,
        "Object stores initialized successfully"
    );

    Ok((media_store, transcript_store))
}
