/// Track domain type
use serde::{Deserialize, Serialize};

/// A playable song reference as served by the catalog API
///
/// Immutable once fetched. Lists (search results, playlists, liked songs,
/// recommendations) own their own clones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Stable catalog identifier, used for matching across lists
    pub track_id: String,

    /// Song title
    pub name: String,

    /// Artist name
    pub artist: String,

    /// Preview audio URL
    #[serde(rename = "spotify_preview_url", default)]
    pub preview_url: String,

    /// Spotify identifier, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spotify_id: Option<String>,

    /// Comma separated tags, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

impl Track {
    /// Create a track with the required fields
    pub fn new(
        track_id: impl Into<String>,
        name: impl Into<String>,
        artist: impl Into<String>,
        preview_url: impl Into<String>,
    ) -> Self {
        Self {
            track_id: track_id.into(),
            name: name.into(),
            artist: artist.into(),
            preview_url: preview_url.into(),
            spotify_id: None,
            tags: None,
        }
    }

    /// "Name - Artist" label shown by players
    pub fn display_label(&self) -> String {
        format!("{} - {}", self.name, self.artist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_catalog_payload() {
        let json = r#"{
            "track_id": "TR1",
            "name": "First Song",
            "artist": "Someone",
            "spotify_preview_url": "https://p.scdn.co/mp3-preview/1",
            "spotify_id": "sp1",
            "tags": "rock, indie"
        }"#;

        let track: Track = serde_json::from_str(json).unwrap();
        assert_eq!(track.track_id, "TR1");
        assert_eq!(track.preview_url, "https://p.scdn.co/mp3-preview/1");
        assert_eq!(track.spotify_id.as_deref(), Some("sp1"));
        assert_eq!(track.display_label(), "First Song - Someone");
    }

    #[test]
    fn tolerates_missing_optional_fields() {
        let json = r#"{"track_id": "TR2", "name": "Loading...", "artist": "Unknown"}"#;

        let track: Track = serde_json::from_str(json).unwrap();
        assert!(track.preview_url.is_empty());
        assert!(track.tags.is_none());
    }
}
