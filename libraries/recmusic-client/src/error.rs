//! Error types for the RecMusic API client.

use thiserror::Error;

/// Errors that can occur when talking to the RecMusic API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Protected call made without an access token
    #[error("User is not authenticated")]
    NotAuthenticated,

    /// Login rejected
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Search query was empty or whitespace
    #[error("Please enter a song or artist name.")]
    EmptyQuery,

    /// Invalid API base URL
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
