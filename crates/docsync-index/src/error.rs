//! Error types for docsync-index

/// Result type for docsync-index operations
pub type Result<T> = std::result::Result<T, IndexError>;

/// Errors that can occur while talking to the vector store
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("{operation} failed with {status}: {body}")]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// Credentials are missing from the environment
    #[error("{0} is not set")]
    MissingCredentials(&'static str),

    #[error(transparent)]
    Config(#[from] docsync_core::Error),
}
