/// Activity log domain types
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of user interaction reported to the recommender
///
/// Serialized as the plain string the collector expects. Unknown strings
/// round-trip through `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityKind {
    /// A track was started from a list
    Play,
    /// A track was liked
    Like,
    /// A like was removed
    Unlike,
    /// A track was skipped before the listening threshold
    Skip,
    /// A track was added to a playlist
    AddToPlaylist,
    /// A track was removed from a playlist
    RemoveFromPlaylist,
    /// Any other event type
    Other(String),
}

impl ActivityKind {
    /// Wire name of the activity
    pub fn as_str(&self) -> &str {
        match self {
            ActivityKind::Play => "play",
            ActivityKind::Like => "like",
            ActivityKind::Unlike => "unlike",
            ActivityKind::Skip => "skip",
            ActivityKind::AddToPlaylist => "addPlaylist",
            ActivityKind::RemoveFromPlaylist => "removePlaylist",
            ActivityKind::Other(s) => s,
        }
    }
}

impl From<&str> for ActivityKind {
    fn from(s: &str) -> Self {
        match s {
            "play" => ActivityKind::Play,
            "like" => ActivityKind::Like,
            "unlike" => ActivityKind::Unlike,
            "skip" => ActivityKind::Skip,
            "addPlaylist" => ActivityKind::AddToPlaylist,
            "removePlaylist" => ActivityKind::RemoveFromPlaylist,
            other => ActivityKind::Other(other.to_string()),
        }
    }
}

impl From<String> for ActivityKind {
    fn from(s: String) -> Self {
        ActivityKind::from(s.as_str())
    }
}

impl From<ActivityKind> for String {
    fn from(kind: ActivityKind) -> Self {
        match kind {
            ActivityKind::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One user-interaction event destined for the activity collector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// Event type
    #[serde(rename = "type")]
    pub kind: ActivityKind,

    /// ISO-8601 UTC timestamp with millisecond precision
    pub timestamp: String,

    /// Track the event refers to
    #[serde(rename = "songId", default, skip_serializing_if = "Option::is_none")]
    pub track_id: Option<String>,
}

impl ActivityEntry {
    /// Create an entry stamped with the current time
    pub fn now(kind: ActivityKind, track_id: Option<String>) -> Self {
        Self::at(kind, track_id, Utc::now())
    }

    /// Create an entry stamped with the given time
    pub fn at(kind: ActivityKind, track_id: Option<String>, when: DateTime<Utc>) -> Self {
        Self {
            kind,
            timestamp: when.to_rfc3339_opts(SecondsFormat::Millis, true),
            track_id,
        }
    }
}
