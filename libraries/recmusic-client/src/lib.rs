//! RecMusic API Client
//!
//! HTTP client library for the RecMusic backend.
//!
//! # Features
//!
//! - **Accounts**: register, login (token pair + profile), logout
//! - **Songs**: search, like/unlike, liked songs
//! - **Playlists**: list, fetch, create, delete, add/remove songs
//! - **Recommender**: personal recommendations
//! - **Display modes**: `tracks_for` loads the list behind a `DisplayMode`
//!
//! Tokens are read from and written to a shared
//! [`SessionStore`](recmusic_core::SessionStore). Protected calls without a
//! token fail with [`ClientError::NotAuthenticated`] before any request.
//!
//! # Example
//!
//! ```ignore
//! use recmusic_client::{ClientConfig, RecMusicClient};
//! use recmusic_core::{CookieSessionStore, DisplayMode};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = Arc::new(CookieSessionStore::new());
//!     let client = RecMusicClient::new(ClientConfig::new("http://localhost:8000"), session)?;
//!
//!     client.login("alice", "secret").await?;
//!     let tracks = client.tracks_for(&DisplayMode::Recommended).await?;
//!     println!("{} recommendations", tracks.len());
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod error;
mod playlists;
mod response;
mod songs;
mod types;

// Re-export main types
pub use client::RecMusicClient;
pub use error::{ClientError, Result};
pub use types::{
    ClientConfig, CreatePlaylistRequest, CreatePlaylistResponse, LoginRequest,
    RecommendationsResponse, RegisterRequest, TokenPair,
};

// Re-export sub-clients for direct use if needed
pub use auth::AuthClient;
pub use playlists::PlaylistClient;
pub use songs::SongsClient;
