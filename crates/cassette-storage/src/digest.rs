//! Content digests
//!
//! Objects are addressed by the SHA-256 of their bytes. The digest is
//! computed incrementally while the upload is spooled to disk, so the
//! content is only ever read once.

use sha2::{Digest, Sha256};
use std::fmt;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Number of hex characters kept when a digest is truncated for naming.
pub const TRUNCATED_DIGEST_LEN: usize = 12;

/// A finalized SHA-256 digest in lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDigest(String);

impl ContentDigest {
    /// Compute the digest of a byte slice in one shot.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut acc = DigestAccumulator::new();
        acc.update(data);
        acc.finalize()
    }

    /// Compute the digest of everything an async reader yields.
    pub async fn from_reader<R>(reader: &mut R) -> std::io::Result<Self>
    where
        R: AsyncRead + Unpin,
    {
        let mut acc = DigestAccumulator::new();
        let mut buf = [0u8; 32 * 1024];
        loop {
            let n = reader.read(&mut buf).await?;
            if n == 0 {
                break;
            }
            acc.update(&buf[..n]);
        }
        Ok(acc.finalize())
    }

    /// Full 64-character hex digest.
    pub fn as_hex(&self) -> &str {
        &self.0
    }

    /// Leading hex characters used for truncated identifiers.
    pub fn truncated(&self) -> &str {
        &self.0[..TRUNCATED_DIGEST_LEN]
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Incremental SHA-256 state fed chunk by chunk during spooling.
pub struct DigestAccumulator {
    hasher: Sha256,
    bytes_seen: u64,
}

impl DigestAccumulator {
    pub fn new() -> Self {
        Self {
            hasher: Sha256::new(),
            bytes_seen: 0,
        }
    }

    /// Feed a chunk of content into the digest.
    pub fn update(&mut self, chunk: &[u8]) {
        self.hasher.update(chunk);
        self.bytes_seen += chunk.len() as u64;
    }

    /// Total number of bytes fed so far.
    pub fn bytes_seen(&self) -> u64 {
        self.bytes_seen
    }

    pub fn finalize(self) -> ContentDigest {
        ContentDigest(hex::encode(self.hasher.finalize()))
    }
}

impl Default for DigestAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
