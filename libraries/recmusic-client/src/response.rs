//! Shared response handling.

use crate::error::{ClientError, Result};
use reqwest::Response;
use serde::de::DeserializeOwned;

/// Classify a failed send.
pub(crate) fn send_error(e: reqwest::Error) -> ClientError {
    if e.is_connect() || e.is_timeout() {
        ClientError::ServerUnreachable(e.to_string())
    } else {
        ClientError::Request(e)
    }
}

/// Pass 2xx responses through, turn anything else into `ClientError::Server`.
pub(crate) async fn success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(ClientError::Server {
        status: status.as_u16(),
        message,
    })
}

/// Decode a 2xx JSON body.
pub(crate) async fn json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    success(response)
        .await?
        .json()
        .await
        .map_err(|e| ClientError::ParseError(format!("Failed to parse {}: {}", what, e)))
}
