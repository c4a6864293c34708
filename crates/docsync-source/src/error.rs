//! Error types for docsync-source

/// Result type for docsync-source operations
pub type Result<T> = std::result::Result<T, SourceError>;

/// Errors that can occur while fetching articles
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Transport-level failure (DNS, TLS, timeout, bad body)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The help center answered with a non-success status
    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// Article body could not be rewritten
    #[error("HTML conversion failed: {0}")]
    Html(#[from] lol_html::errors::RewritingError),

    #[error("Invalid source configuration: {0}")]
    Config(String),
}
