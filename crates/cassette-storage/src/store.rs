//! Content-addressed object store
//!
//! Each upload is consumed in a single streaming pass: the bytes are
//! spooled to a temporary file under the storage root while the SHA-256
//! digest and a type-detection sample accumulate. Once the content is
//! fully on disk the final name is known; the spool file is promoted
//! with an atomic rename, or discarded when identical content is
//! already present. Storing the same bytes twice is not an error, it
//! resolves to the same identifier with no second write.

use crate::digest::{ContentDigest, DigestAccumulator};
use crate::error::{StoreError, StoreResult};
use crate::naming::{
    content_type_for_identifier, derive_extension, sanitize_identifier, NamingScheme,
};
use crate::sniff::{normalize_media_type, sniff_media_type, SNIFF_SAMPLE_LEN};
use bytes::Bytes;
use futures::{Stream, StreamExt};
use std::path::{Path, PathBuf};
use std::pin::Pin;
use tokio::fs;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt, BufWriter};
use uuid::Uuid;

/// Chunk size for reading upload streams while spooling.
const SPOOL_BUF_SIZE: usize = 32 * 1024;

/// Immutable settings for one object store, fixed at construction.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Root directory objects are stored under.
    pub root: PathBuf,
    /// Base URL for public object URLs; `None` disables URL generation.
    pub base_url: Option<String>,
    /// Upper bound on object size in bytes.
    pub max_object_bytes: u64,
    /// Allow-list of detected media types; `None` accepts any content.
    pub allowed_media_types: Option<Vec<String>>,
    /// How identifiers incorporate the content digest.
    pub naming: NamingScheme,
}

/// Outcome of a successful ingest.
#[derive(Debug, Clone)]
pub struct StoredObject {
    /// Digest-derived object name, e.g. `3a7b…e2f1.png`.
    pub identifier: String,
    pub digest: ContentDigest,
    /// Media type detected from the content.
    pub media_type: String,
    pub size_bytes: u64,
    /// Public URL when the store has a base URL configured.
    pub url: Option<String>,
    /// True when identical content was already present and no write happened.
    pub deduplicated: bool,
}

/// A stored object opened for streaming retrieval.
pub struct RetrievedObject {
    pub stream: Pin<Box<dyn Stream<Item = Result<Bytes, StoreError>> + Send>>,
    pub size_bytes: u64,
    /// Derived from the identifier's extension, not from the bytes.
    pub content_type: &'static str,
}

/// What the spooling pass learned about an upload.
struct SpooledUpload {
    digest: ContentDigest,
    sample: Vec<u8>,
    size_bytes: u64,
}

/// Content-addressed store over a local directory.
#[derive(Clone)]
pub struct ObjectStore {
    config: StoreConfig,
    tmp_dir: PathBuf,
}

impl ObjectStore {
    /// Open a store, creating the root and spool directories.
    pub async fn new(config: StoreConfig) -> StoreResult<Self> {
        let tmp_dir = config.root.join("tmp");

        fs::create_dir_all(&tmp_dir).await.map_err(|e| {
            StoreError::Config(format!(
                "Failed to create storage directory {}: {}",
                tmp_dir.display(),
                e
            ))
        })?;

        Ok(ObjectStore { config, tmp_dir })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Ingest in-memory content.
    pub async fn ingest(&self, data: &[u8], original_filename: &str) -> StoreResult<StoredObject> {
        self.ingest_stream(&mut &data[..], Some(data.len() as u64), original_filename)
            .await
    }

    /// Ingest content from a reader in a single pass.
    ///
    /// A declared length above the ceiling is rejected before any byte
    /// is read. Streams of unknown length are cut off as soon as the
    /// ceiling is crossed. The type gate runs after spooling, on the
    /// detection sample, so a rejected upload never reaches its final
    /// path.
    pub async fn ingest_stream<R>(
        &self,
        reader: &mut R,
        declared_len: Option<u64>,
        original_filename: &str,
    ) -> StoreResult<StoredObject>
    where
        R: AsyncRead + Unpin + Send,
    {
        if let Some(len) = declared_len {
            if len > self.config.max_object_bytes {
                return Err(StoreError::TooLarge {
                    size: len,
                    limit: self.config.max_object_bytes,
                });
            }
        }

        let start = std::time::Instant::now();
        let spool_path = self.tmp_dir.join(format!("ingest-{}", Uuid::new_v4()));

        let spooled = match self.spool(reader, &spool_path).await {
            Ok(spooled) => spooled,
            Err(e) => {
                let _ = fs::remove_file(&spool_path).await;
                return Err(e);
            }
        };

        let media_type = sniff_media_type(&spooled.sample).to_string();
        if let Some(allowed) = &self.config.allowed_media_types {
            if !allowed
                .iter()
                .any(|t| normalize_media_type(t).eq_ignore_ascii_case(&media_type))
            {
                let _ = fs::remove_file(&spool_path).await;
                return Err(StoreError::DisallowedType(media_type));
            }
        }

        let identifier = format!(
            "{}{}",
            self.config.naming.digest_part(&spooled.digest),
            derive_extension(original_filename, &media_type)
        );
        let path = self.object_path(&identifier)?;

        let deduplicated = matches!(fs::metadata(&path).await, Ok(meta) if meta.is_file());
        if deduplicated {
            let _ = fs::remove_file(&spool_path).await;
            tracing::info!(
                identifier = %identifier,
                digest = %spooled.digest,
                "Object already stored, write skipped"
            );
        } else {
            // Rename is atomic within the storage filesystem. If two ingests
            // of the same content race past the metadata check, the loser
            // replaces the winner with identical bytes.
            if let Err(e) = fs::rename(&spool_path, &path).await {
                let _ = fs::remove_file(&spool_path).await;
                return Err(StoreError::WriteFailed(format!(
                    "Failed to promote spool file to {}: {}",
                    path.display(),
                    e
                )));
            }

            tracing::info!(
                path = %path.display(),
                identifier = %identifier,
                size_bytes = spooled.size_bytes,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Object stored"
            );
        }

        let url = self
            .config
            .base_url
            .as_ref()
            .map(|base| format!("{}/{}", base.trim_end_matches('/'), identifier));

        Ok(StoredObject {
            identifier,
            digest: spooled.digest,
            media_type,
            size_bytes: spooled.size_bytes,
            url,
            deduplicated,
        })
    }

    /// Open an object for streaming download.
    ///
    /// The identifier is validated before any filesystem access. A
    /// well-formed identifier with no object behind it is reported as
    /// `NotFound`, distinct from a malformed one.
    pub async fn retrieve(&self, identifier: &str) -> StoreResult<RetrievedObject> {
        let path = self.object_path(identifier)?;
        let start = std::time::Instant::now();

        let meta = match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => meta,
            _ => return Err(StoreError::NotFound(identifier.to_string())),
        };

        let file = fs::File::open(&path).await.map_err(|e| {
            StoreError::ReadFailed(format!("Failed to open file {}: {}", path.display(), e))
        })?;

        let reader = tokio_util::io::ReaderStream::new(file);

        let stream = reader.map(|result| {
            result.map_err(|e| StoreError::ReadFailed(format!("Failed to read chunk: {}", e)))
        });

        let id = identifier.to_string();
        let path_display = path.display().to_string();
        let logged_stream = stream.map(move |item| {
            if item.is_err() {
                tracing::error!(
                    path = %path_display,
                    identifier = %id,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Object stream read error"
                );
            }
            item
        });

        Ok(RetrievedObject {
            stream: Box::pin(logged_stream),
            size_bytes: meta.len(),
            content_type: content_type_for_identifier(identifier),
        })
    }

    /// Check if an object exists.
    pub async fn exists(&self, identifier: &str) -> StoreResult<bool> {
        let path = self.object_path(identifier)?;
        match fs::metadata(&path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    /// Resolve an identifier to its path under the root.
    ///
    /// Identifiers cannot name the spool directory: they contain no
    /// path separators, and the bare name `tmp` resolves to a
    /// directory, which lookups treat as absent.
    fn object_path(&self, identifier: &str) -> StoreResult<PathBuf> {
        let identifier = sanitize_identifier(identifier)?;
        Ok(self.config.root.join(identifier))
    }

    /// Write a stream to the spool file while digesting and sampling it.
    ///
    /// On error the caller removes the spool file.
    async fn spool<R>(&self, reader: &mut R, spool_path: &Path) -> StoreResult<SpooledUpload>
    where
        R: AsyncRead + Unpin + Send,
    {
        let file = fs::File::create(spool_path).await.map_err(|e| {
            StoreError::WriteFailed(format!(
                "Failed to create spool file {}: {}",
                spool_path.display(),
                e
            ))
        })?;

        let mut writer = BufWriter::new(file);
        let mut accumulator = DigestAccumulator::new();
        let mut sample = Vec::with_capacity(SNIFF_SAMPLE_LEN);
        let mut buf = [0u8; SPOOL_BUF_SIZE];

        loop {
            let n = reader.read(&mut buf).await.map_err(|e| {
                StoreError::ReadFailed(format!("Failed to read upload stream: {}", e))
            })?;
            if n == 0 {
                break;
            }
            let chunk = &buf[..n];

            accumulator.update(chunk);
            if accumulator.bytes_seen() > self.config.max_object_bytes {
                return Err(StoreError::TooLarge {
                    size: accumulator.bytes_seen(),
                    limit: self.config.max_object_bytes,
                });
            }

            if sample.len() < SNIFF_SAMPLE_LEN {
                let take = (SNIFF_SAMPLE_LEN - sample.len()).min(chunk.len());
                sample.extend_from_slice(&chunk[..take]);
            }

            writer.write_all(chunk).await.map_err(|e| {
                StoreError::WriteFailed(format!(
                    "Failed to write spool file {}: {}",
                    spool_path.display(),
                    e
                ))
            })?;
        }

        // BufWriter::into_inner does not flush buffered bytes.
        writer.flush().await.map_err(|e| {
            StoreError::WriteFailed(format!(
                "Failed to flush spool file {}: {}",
                spool_path.display(),
                e
            ))
        })?;
        writer.into_inner().sync_all().await.map_err(|e| {
            StoreError::WriteFailed(format!(
                "Failed to sync spool file {}: {}",
                spool_path.display(),
                e
            ))
        })?;

        let size_bytes = accumulator.bytes_seen();
        Ok(SpooledUpload {
            digest: accumulator.finalize(),
            sample,
            size_bytes,
        })
    }
}
