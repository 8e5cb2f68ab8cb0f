//! Content sources and the factory that picks one.
//!
//! A source produces a validated [`ContentStore`]. The file-backed source handles
//! compressed documents transparently; the built-in source parses the sample document
//! compiled into the binary.

use crate::content::compression::{decompress, detect_compression};
use crate::content::model::ContentStore;
use crate::content::validation::{validate_content_path, validate_store};
use crate::error::{FolioError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Sample portfolio shipped with the binary
const BUILTIN_DOCUMENT: &str = include_str!("../../assets/portfolio.toml");

/// Core trait for loading portfolio content.
///
/// Implementations must return a store that already passed [`validate_store`].
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Load, parse and validate the content store
    async fn load(&self) -> Result<ContentStore>;

    /// Human-readable origin of the content, shown in the status line
    fn describe(&self) -> String;
}

/// Content loaded from a TOML document on disk, optionally compressed
#[derive(Debug, Clone)]
pub struct FileContentSource {
    path: PathBuf,
}

impl FileContentSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ContentSource for FileContentSource {
    async fn load(&self) -> Result<ContentStore> {
        validate_content_path(&self.path)?;

        let raw = tokio::fs::read(&self.path).await.map_err(|e| {
            FolioError::file_error(format!("Failed to read {}", self.path.display()), e)
        })?;
        let compression = detect_compression(&self.path, &raw);
        if compression.is_compressed() {
            log::debug!(
                "inflating {} content document {}",
                compression.name(),
                self.path.display()
            );
        }
        let bytes = decompress(raw, compression).await?;

        let text = String::from_utf8(bytes).map_err(|_| {
            FolioError::content_parse(&self.path, "document is not valid UTF-8")
        })?;
        parse_document(&self.path, &text)
    }

    fn describe(&self) -> String {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("<unnamed>")
            .to_string()
    }
}

/// The sample portfolio compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinContentSource;

#[async_trait]
impl ContentSource for BuiltinContentSource {
    async fn load(&self) -> Result<ContentStore> {
        parse_document(Path::new("<builtin>"), BUILTIN_DOCUMENT)
    }

    fn describe(&self) -> String {
        "built-in sample".to_string()
    }
}

/// Parse and validate a TOML portfolio document
pub fn parse_document(origin: &Path, text: &str) -> Result<ContentStore> {
    let store: ContentStore =
        toml::from_str(text).map_err(|e| FolioError::content_parse(origin, e.message()))?;
    validate_store(&store)?;
    log::debug!(
        "loaded {} content items from {}",
        store.item_count(),
        origin.display()
    );
    Ok(store)
}

/// Chooses the content source for a run
pub struct ContentSourceFactory;

impl ContentSourceFactory {
    /// A file source when a path is configured, the built-in sample otherwise
    pub fn create(path: Option<&Path>) -> Box<dyn ContentSource> {
        match path {
            Some(path) => Box::new(FileContentSource::new(path)),
            None => Box::new(BuiltinContentSource),
        }
    }
}
