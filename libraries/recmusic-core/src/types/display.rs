/// Track list display modes
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// Which list a track display is showing
///
/// Each mode carries only the fields relevant to it, so hosts decide between
/// "remove from playlist" and "add to playlist" by matching on the mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DisplayMode {
    /// Recommendations for the current user
    Recommended,

    /// Songs the user liked
    Liked,

    /// Songs of one playlist
    Playlist { playlist_id: i64, name: String },

    /// Results of a catalog search
    SearchResults { query: String },
}

impl DisplayMode {
    /// Search results for a trimmed, non-blank query
    pub fn search(query: &str) -> Result<Self> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CoreError::invalid_input(
                "Please enter a song or artist name.",
            ));
        }
        Ok(DisplayMode::SearchResults {
            query: query.to_string(),
        })
    }

    /// Heading shown above the list
    pub fn title(&self) -> String {
        match self {
            DisplayMode::Recommended => "Recommended for you".to_string(),
            DisplayMode::Liked => "Liked songs".to_string(),
            DisplayMode::Playlist { name, .. } => name.clone(),
            DisplayMode::SearchResults { query } => format!("Results for \"{}\"", query),
        }
    }

    /// Tracks in this list can be removed from it
    pub fn allows_remove(&self) -> bool {
        matches!(self, DisplayMode::Playlist { .. })
    }

    /// Tracks in this list can be added to a playlist
    pub fn allows_add_to_playlist(&self) -> bool {
        !self.allows_remove()
    }

    /// Playlist the list belongs to, if any
    pub fn playlist_id(&self) -> Option<i64> {
        match self {
            DisplayMode::Playlist { playlist_id, .. } => Some(*playlist_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playlist_mode_allows_remove_only() {
        let mode = DisplayMode::Playlist {
            playlist_id: 4,
            name: "Road trip".to_string(),
        };

        assert!(mode.allows_remove());
        assert!(!mode.allows_add_to_playlist());
        assert_eq!(mode.playlist_id(), Some(4));
        assert_eq!(mode.title(), "Road trip");
    }

    #[test]
    fn other_modes_allow_add() {
        for mode in [
            DisplayMode::Recommended,
            DisplayMode::Liked,
            DisplayMode::SearchResults {
                query: "abba".to_string(),
            },
        ] {
            assert!(mode.allows_add_to_playlist());
            assert!(mode.playlist_id().is_none());
        }
    }

    #[test]
    fn search_mode_requires_query() {
        assert_eq!(
            DisplayMode::search("  abba ").unwrap(),
            DisplayMode::SearchResults {
                query: "abba".to_string()
            }
        );
        assert!(matches!(
            DisplayMode::search("   "),
            Err(CoreError::InvalidInput(_))
        ));
    }
}
