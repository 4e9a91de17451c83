//! Playlist endpoints.

use crate::error::Result;
use crate::response::{self, send_error};
use crate::types::{CreatePlaylistRequest, CreatePlaylistResponse};
use recmusic_core::Playlist;
use reqwest::Client;
use tracing::{debug, info};

/// Playlist client for the RecMusic API.
pub struct PlaylistClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: String,
}

impl<'a> PlaylistClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, access_token: String) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    fn url(&self, suffix: &str) -> String {
        format!("{}/api/songs/playlists/{}", self.base_url, suffix)
    }

    /// All playlists of the user.
    pub async fn list(&self) -> Result<Vec<Playlist>> {
        let url = self.url("");
        debug!(url = %url, "Fetching playlists");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(send_error)?;

        response::json(response, "playlists").await
    }

    /// One playlist with its songs.
    pub async fn get(&self, playlist_id: i64) -> Result<Playlist> {
        let url = self.url(&format!("{}/", playlist_id));
        debug!(url = %url, "Fetching playlist");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(send_error)?;

        response::json(response, "playlist").await
    }

    /// Create a playlist and return its id.
    pub async fn create(&self, name: &str) -> Result<i64> {
        let url = self.url("");
        debug!(url = %url, name = %name, "Creating playlist");

        let request = CreatePlaylistRequest {
            name: name.to_string(),
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await
            .map_err(send_error)?;

        let created: CreatePlaylistResponse = response::json(response, "created playlist").await?;
        info!(playlist_id = created.id, name = %name, "Playlist created");
        Ok(created.id)
    }

    /// Delete a playlist.
    pub async fn delete(&self, playlist_id: i64) -> Result<()> {
        let url = self.url(&format!("{}/delete/", playlist_id));
        debug!(url = %url, "Deleting playlist");

        let response = self
            .http
            .delete(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(send_error)?;

        response::success(response).await?;
        info!(playlist_id, "Playlist deleted");
        Ok(())
    }

    /// Add a track to a playlist.
    pub async fn add(&self, playlist_id: i64, track_id: &str) -> Result<()> {
        let url = self.url(&format!("{}/add/{}/", playlist_id, track_id));
        debug!(url = %url, "Adding song to playlist");

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

    /// Remove a track from a playlist.
    pub async fn remove(&self, playlist_id: i64, track_id: &str) -> Result<()> {
        let url = self.url(&format!("{}/remove/{}/", playlist_id, track_id));
        debug!(url = %url, "Removing song from playlist");

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
}
