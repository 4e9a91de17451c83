/// Playlist domain type
use crate::types::Track;
use serde::{Deserialize, Serialize};

/// User playlist with its songs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Playlist identifier
    pub id: i64,

    /// Playlist name, unique per user
    pub name: String,

    /// Owner user ID
    #[serde(default)]
    pub user: Option<i64>,

    /// Songs in the playlist
    #[serde(default)]
    pub songs: Vec<Track>,
}

impl Playlist {
    /// Check whether the playlist contains a track
    pub fn contains(&self, track_id: &str) -> bool {
        self.songs.iter().any(|t| t.track_id == track_id)
    }
}
