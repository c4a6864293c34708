//! Error types for docsync-core

use std::path::PathBuf;

/// Result type for docsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error returned by content sources and remote indexes
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur in docsync-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The content source could not produce the current article set
    #[error("Fetch failed: {source}")]
    Fetch {
        #[source]
        source: BoxError,
    },

    /// The persisted state file exists but cannot be trusted
    #[error("Corrupt sync state at {path}: {reason}")]
    CorruptState { path: PathBuf, reason: String },

    /// An identifier cannot be used as a cache file name
    #[error("Invalid identifier {identifier:?}: {reason}")]
    InvalidIdentifier { identifier: String, reason: String },

    /// A required configuration value is missing or malformed
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Filesystem error from docsync-fs
    #[error(transparent)]
    Fs(#[from] docsync_fs::Error),
}

impl Error {
    pub fn fetch(source: impl Into<BoxError>) -> Self {
        Self::Fetch {
            source: source.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
