//! Types for RecMusic API requests and responses.

use recmusic_core::{RecMusicConfig, Track};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for connecting to the RecMusic API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API (e.g., "http://localhost:8000")
    pub base_url: String,
    /// Whole-request timeout
    pub timeout: Duration,
    /// Connection timeout
    pub connect_timeout: Duration,
}

impl ClientConfig {
    /// Create a config with default timeouts.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Take the API base URL from the client configuration.
    pub fn from_config(config: &RecMusicConfig) -> Self {
        Self::new(config.api.base_url.clone())
    }
}

// =============================================================================
// Authentication Types
// =============================================================================

/// Request body for the login endpoint.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for the register endpoint.
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Token pair returned by a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

// =============================================================================
// Song & Playlist Types
// =============================================================================

/// Request body for creating a playlist.
#[derive(Debug, Serialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
}

/// Response from creating a playlist.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaylistResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub id: i64,
}

/// Response from the recommender.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationsResponse {
    #[serde(default)]
    pub recommendations: Vec<Track>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_takes_api_url() {
        let mut core = RecMusicConfig::default();
        core.api.base_url = "https://recmusic.example.com".into();

        let config = ClientConfig::from_config(&core);
        assert_eq!(config.base_url, "https://recmusic.example.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn empty_recommendations() {
        let response: RecommendationsResponse =
            serde_json::from_str(r#"{"recommendations": []}"#).unwrap();
        assert!(response.recommendations.is_empty());
    }
}
