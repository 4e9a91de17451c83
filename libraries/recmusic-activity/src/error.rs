//! Error types for activity reporting

use thiserror::Error;

/// Errors from delivering activity batches
#[derive(Error, Debug)]
pub enum ActivityError {
    /// HTTP request failed (connection, timeout, body encoding)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Collector answered with a non-success status
    #[error("Collector rejected batch ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Invalid collector base URL
    #[error("Invalid collector URL: {0}")]
    InvalidUrl(String),
}

/// Result type for activity operations
pub type Result<T> = std::result::Result<T, ActivityError>;
