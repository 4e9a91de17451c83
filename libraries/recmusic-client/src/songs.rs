//! Song catalog, likes and recommendations.

use crate::error::{ClientError, Result};
use crate::response::{self, send_error};
use crate::types::RecommendationsResponse;
use recmusic_core::Track;
use reqwest::Client;
use tracing::debug;

/// Song client for the RecMusic API.
pub struct SongsClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: String,
}

impl<'a> SongsClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, access_token: String) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// Search tracks by name or artist.
    ///
    /// Blank queries are rejected without a request.
    pub async fn search(&self, query: &str) -> Result<Vec<Track>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ClientError::EmptyQuery);
        }

        let url = format!("{}/api/songs/search/", self.base_url);
        debug!(url = %url, query = %query, "Searching songs");

        let response = self
            .http
            .get(&url)
            .query(&[("q", query)])
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(send_error)?;

        let tracks: Vec<Track> = response::json(response, "search results").await?;
        debug!(query = %query, results = tracks.len(), "Search complete");
        Ok(tracks)
    }

    /// Like a track.
    pub async fn like(&self, track_id: &str) -> Result<()> {
        let url = format!("{}/api/songs/like/{}/", self.base_url, track_id);
        debug!(url = %url, "Liking song");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(send_error)?;

        response::success(response).await?;
        Ok(())
    }

    /// Remove a like.
    pub async fn unlike(&self, track_id: &str) -> Result<()> {
        let url = format!("{}/api/songs/unlike/{}/", self.base_url, track_id);
        debug!(url = %url, "Unliking song");

        let response = self
            .http
            .delete(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(send_error)?;

        response::success(response).await?;
        Ok(())
    }

    /// Tracks the user liked.
    pub async fn liked(&self) -> Result<Vec<Track>> {
        let url = format!("{}/api/songs/liked/", self.base_url);
        debug!(url = %url, "Fetching liked songs");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(send_error)?;

        response::json(response, "liked songs").await
    }

    /// Personal recommendations.
    pub async fn recommendations(&self) -> Result<Vec<Track>> {
        let url = format!("{}/api/recommender/recommend/", self.base_url);
        debug!(url = %url, "Fetching recommendations");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(send_error)?;

        let body: RecommendationsResponse = response::json(response, "recommendations").await?;
        Ok(body.recommendations)
    }
}
