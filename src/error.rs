//! Unified error type for sitekit.

use thiserror::Error;

/// Errors that can occur while running the site tools.
#[derive(Debug, Error)]
pub enum SiteError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Content entries failed to index.
    #[error("Content error: {0}")]
    Content(String),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Summary serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// JPEG encoding error.
    #[error("Encode error: {0}")]
    Encode(String),
}
