//! Error types and handling infrastructure for folio.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! custom error types. The binary layers `anyhow` on top for context at the edges.
//!
//! Searching itself never fails: an unmatched query is an empty result list, not an
//! error. Everything here concerns loading content, persisting preferences and
//! driving the terminal.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for folio operations.
#[derive(Error, Debug)]
pub enum FolioError {
    /// File system related errors (file not found, permission denied, etc.)
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Content file not found specifically (common case for user feedback)
    #[error("Content file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Content document could not be parsed
    #[error("Failed to parse content document {path}: {message}")]
    ContentParse { path: PathBuf, message: String },

    /// Content document parsed but violates store invariants
    #[error("Invalid content: {message}")]
    ContentError { message: String },

    /// Compression format detection or decompression errors
    #[error("Compression error: {message}")]
    CompressionError { message: String },

    /// Preference loading or persistence errors
    #[error("Preferences error: {message}")]
    PreferencesError { message: String },

    /// Search worker communication errors
    #[error("Search worker failed: {message}")]
    SearchError { message: String },

    /// UI and terminal related errors
    #[error("UI operation failed: {message}")]
    UIError { message: String },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Invalid command line arguments
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

/// Standard Result type for folio operations.
pub type Result<T> = std::result::Result<T, FolioError>;

impl FolioError {
    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }

    /// Create a ContentParse error for the document at `path`
    pub fn content_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ContentParse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a ContentError with a descriptive message
    pub fn content(message: impl Into<String>) -> Self {
        Self::ContentError {
            message: message.into(),
        }
    }

    /// Create a CompressionError with a descriptive message
    pub fn compression(message: impl Into<String>) -> Self {
        Self::CompressionError {
            message: message.into(),
        }
    }

    /// Create a PreferencesError with a descriptive message
    pub fn preferences(message: impl Into<String>) -> Self {
        Self::PreferencesError {
            message: message.into(),
        }
    }

    /// Create a SearchError with a descriptive message
    pub fn search(message: impl Into<String>) -> Self {
        Self::SearchError {
            message: message.into(),
        }
    }

    /// Create a UIError with a descriptive message
    pub fn ui(message: impl Into<String>) -> Self {
        Self::UIError {
            message: message.into(),
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }
}

// Automatic conversion from io::Error to FolioError
impl From<std::io::Error> for FolioError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::FileError {
                message: "File not found".to_string(),
                source: err,
            },
            std::io::ErrorKind::PermissionDenied => Self::FileError {
                message: "Permission denied".to_string(),
                source: err,
            },
            _ => Self::FileError {
                message: "IO operation failed".to_string(),
                source: err,
            },
        }
    }
}
