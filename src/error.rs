//! Error types for the answer engine

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Answer engine errors
///
/// Only [`Error::IndexUnavailable`] is fatal to callers: it is raised when the
/// backing vector store cannot be opened at startup. Backend and parse
/// failures are recovered locally by the composer and classifier fallbacks
/// and never surface from the query paths.
#[derive(Debug, Error)]
pub enum Error {
    /// Backing vector store cannot be opened or created
    #[error("vector index unavailable: {0}")]
    IndexUnavailable(String),

    /// Embedding length differs from the dimension established by the first insert
    #[error("embedding dimension mismatch: index expects {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Generative or embedding backend call failed (network, quota, auth)
    #[error("backend call failed: {0}")]
    Backend(String),

    /// Backend returned text that does not parse as the expected result
    #[error("unparseable backend response: {0}")]
    Parse(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Create an index-unavailable error
    pub fn index_unavailable(message: impl Into<String>) -> Self {
        Self::IndexUnavailable(message.into())
    }

    /// Create a backend error
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
