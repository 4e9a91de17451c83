//! Main RecMusic API client.

use crate::auth::AuthClient;
use crate::error::{ClientError, Result};
use crate::playlists::PlaylistClient;
use crate::songs::SongsClient;
use crate::types::ClientConfig;
use recmusic_core::{DisplayMode, Playlist, SessionStore, Track, User};
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

/// Client for the RecMusic songs, playlists and recommender API.
///
/// Tokens live in the shared [`SessionStore`], so the activity batcher and
/// this client always agree on who is logged in.
///
/// # Example
///
/// ```ignore
/// use recmusic_client::{ClientConfig, RecMusicClient};
/// use recmusic_core::CookieSessionStore;
/// use std::sync::Arc;
///
/// let session = Arc::new(CookieSessionStore::new());
/// let client = RecMusicClient::new(ClientConfig::new("http://localhost:8000"), session)?;
///
/// let user = client.login("alice", "secret").await?;
/// let tracks = client.search("daft punk").await?;
/// client.like(&tracks[0].track_id).await?;
/// ```
pub struct RecMusicClient {
    http: Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl RecMusicClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig, session: Arc<dyn SessionStore>) -> Result<Self> {
        let base_url = normalize_base_url(&config.base_url)?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(format!("RecMusic/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    /// Normalized API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Session store shared with the rest of the application.
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    /// A token and a usable user record are present.
    pub fn is_authenticated(&self) -> bool {
        self.session.access_token().is_some() && self.session.user().is_some()
    }

    // ===== Account =====

    /// Account endpoints (no token required).
    pub fn auth(&self) -> AuthClient<'_> {
        AuthClient::new(&self.http, &self.base_url)
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<()> {
        self.auth().register(username, email, password).await
    }

    /// Log in and store the session.
    ///
    /// The profile is fetched with the new token; nothing is stored unless
    /// both calls succeed.
    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        let auth = self.auth();
        let tokens = auth.login(username, password).await?;
        let user = auth.profile(&tokens.access).await?;

        self.session.login(&tokens.access, &tokens.refresh, &user);
        info!(user_id = user.id, username = %user.username, "Login successful");
        Ok(user)
    }

    /// Forget the stored session.
    pub fn logout(&self) {
        self.session.logout();
        info!("Logged out");
    }

    // ===== Protected endpoints =====

    /// Song endpoints.
    ///
    /// Returns an error if not authenticated.
    pub fn songs(&self) -> Result<SongsClient<'_>> {
        let token = self.access_token()?;
        Ok(SongsClient::new(&self.http, &self.base_url, token))
    }

    /// Playlist endpoints.
    ///
    /// Returns an error if not authenticated.
    pub fn playlists_client(&self) -> Result<PlaylistClient<'_>> {
        let token = self.access_token()?;
        Ok(PlaylistClient::new(&self.http, &self.base_url, token))
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Track>> {
        if query.trim().is_empty() {
            return Err(ClientError::EmptyQuery);
        }
        self.songs()?.search(query).await
    }

    pub async fn like(&self, track_id: &str) -> Result<()> {
        self.songs()?.like(track_id).await
    }

    pub async fn unlike(&self, track_id: &str) -> Result<()> {
        self.songs()?.unlike(track_id).await
    }

    pub async fn liked(&self) -> Result<Vec<Track>> {
        self.songs()?.liked().await
    }

    pub async fn recommendations(&self) -> Result<Vec<Track>> {
        self.songs()?.recommendations().await
    }

    pub async fn playlists(&self) -> Result<Vec<Playlist>> {
        self.playlists_client()?.list().await
    }

    pub async fn playlist(&self, playlist_id: i64) -> Result<Playlist> {
        self.playlists_client()?.get(playlist_id).await
    }

    pub async fn create_playlist(&self, name: &str) -> Result<i64> {
        self.playlists_client()?.create(name).await
    }

    pub async fn delete_playlist(&self, playlist_id: i64) -> Result<()> {
        self.playlists_client()?.delete(playlist_id).await
    }

    pub async fn add_to_playlist(&self, playlist_id: i64, track_id: &str) -> Result<()> {
        self.playlists_client()?.add(playlist_id, track_id).await
    }

    pub async fn remove_from_playlist(&self, playlist_id: i64, track_id: &str) -> Result<()> {
        self.playlists_client()?.remove(playlist_id, track_id).await
    }

    /// Tracks shown for a display mode.
    pub async fn tracks_for(&self, mode: &DisplayMode) -> Result<Vec<Track>> {
        debug!(mode = ?mode, "Loading tracks for display");
        match mode {
            DisplayMode::Recommended => self.recommendations().await,
            DisplayMode::Liked => self.liked().await,
            DisplayMode::Playlist { playlist_id, .. } => {
                Ok(self.playlist(*playlist_id).await?.songs)
            }
            DisplayMode::SearchResults { query } => self.search(query).await,
        }
    }

    fn access_token(&self) -> Result<String> {
        self.session
            .access_token()
            .ok_or(ClientError::NotAuthenticated)
    }
}

/// Validate a base URL and strip trailing slashes.
fn normalize_base_url(raw: &str) -> Result<String> {
    if raw.trim().is_empty() {
        return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
    }

    let url = raw.trim().trim_end_matches('/').to_string();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ClientError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }

    let parsed = Url::parse(&url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
    if parsed.host_str().is_none() {
        return Err(ClientError::InvalidUrl("URL has no host".into()));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_removed() {
        assert_eq!(
            normalize_base_url("http://localhost:8000//").unwrap(),
            "http://localhost:8000"
        );
    }

    #[test]
    fn scheme_is_required() {
        assert!(matches!(
            normalize_base_url("localhost:8000"),
            Err(ClientError::InvalidUrl(_))
        ));
        assert!(matches!(
            normalize_base_url("   "),
            Err(ClientError::InvalidUrl(msg)) if msg.contains("empty")
        ));
    }

    #[test]
    fn host_is_required() {
        assert!(matches!(
            normalize_base_url("http://"),
            Err(ClientError::InvalidUrl(_))
        ));
    }
}
