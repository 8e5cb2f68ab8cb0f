//! Compression detection and transparent decompression for content documents.
//!
//! Portfolio documents are small, so the loader reads the whole file and this module
//! decides from the leading bytes (falling back to the extension) whether the buffer
//! needs to be inflated before parsing.

use crate::content::validation::MAX_DOCUMENT_SIZE;
use crate::error::{FolioError, Result};
use async_compression::tokio::bufread::{BzDecoder, GzipDecoder, XzDecoder, ZstdDecoder};
use std::path::Path;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Supported compression formats for content documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    /// No compression - plain TOML
    None,
    /// Gzip compression (.gz files)
    Gzip,
    /// Bzip2 compression (.bz2 files)
    Bzip2,
    /// XZ compression (.xz files)
    Xz,
    /// Zstandard compression (.zst, .zstd files)
    Zstd,
}

impl CompressionType {
    /// Get human-readable name for the compression type
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Gzip => "gzip",
            Self::Bzip2 => "bzip2",
            Self::Xz => "xz",
            Self::Zstd => "zstd",
        }
    }

    /// Check if this type represents a compressed format
    pub fn is_compressed(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Detect the compression of an in-memory document.
///
/// Magic numbers win over the extension:
/// - Gzip: `1f 8b`
/// - Bzip2: `42 5a 68` ("BZh")
/// - XZ: `fd 37 7a 58 5a 00`
/// - Zstd: `28 b5 2f fd`
pub fn detect_compression(path: &Path, bytes: &[u8]) -> CompressionType {
    detect_by_magic(bytes)
        .or_else(|| detect_by_extension(path))
        .unwrap_or(CompressionType::None)
}

fn detect_by_magic(magic: &[u8]) -> Option<CompressionType> {
    if magic.starts_with(&[0x1f, 0x8b]) {
        Some(CompressionType::Gzip)
    } else if magic.starts_with(&[0x42, 0x5a, 0x68]) {
        Some(CompressionType::Bzip2)
    } else if magic.starts_with(&[0x28, 0xb5, 0x2f, 0xfd]) {
        Some(CompressionType::Zstd)
    } else if magic.starts_with(&[0xfd, 0x37, 0x7a, 0x58, 0x5a, 0x00]) {
        Some(CompressionType::Xz)
    } else {
        None
    }
}

fn detect_by_extension(path: &Path) -> Option<CompressionType> {
    let ext = path.extension()?.to_str()?;
    match ext.to_lowercase().as_str() {
        "gz" => Some(CompressionType::Gzip),
        "bz2" => Some(CompressionType::Bzip2),
        "xz" => Some(CompressionType::Xz),
        "zst" | "zstd" => Some(CompressionType::Zstd),
        _ => None,
    }
}

/// Inflate `bytes` according to `compression`; uncompressed input is returned as-is
pub async fn decompress(bytes: Vec<u8>, compression: CompressionType) -> Result<Vec<u8>> {
    decompress_limited(bytes, compression, MAX_DOCUMENT_SIZE).await
}

/// Inflate at most `limit` bytes; a stream that expands beyond it is rejected
async fn decompress_limited(
    bytes: Vec<u8>,
    compression: CompressionType,
    limit: u64,
) -> Result<Vec<u8>> {
    if !compression.is_compressed() {
        return Ok(bytes);
    }

    let input: &[u8] = &bytes;
    let decoder: Box<dyn AsyncRead + Unpin + Send + '_> = match compression {
        CompressionType::None => Box::new(input),
        CompressionType::Gzip => Box::new(GzipDecoder::new(input)),
        CompressionType::Bzip2 => Box::new(BzDecoder::new(input)),
        CompressionType::Xz => Box::new(XzDecoder::new(input)),
        CompressionType::Zstd => Box::new(ZstdDecoder::new(input)),
    };

    let mut data = Vec::new();
    decoder
        .take(limit.saturating_add(1))
        .read_to_end(&mut data)
        .await
        .map_err(|e| {
            FolioError::compression(format!("{} stream is corrupt: {}", compression.name(), e))
        })?;

    if data.len() as u64 > limit {
        return Err(FolioError::content(format!(
            "{} document inflates beyond {} bytes",
            compression.name(),
            limit
        )));
    }
    Ok(data)
}
