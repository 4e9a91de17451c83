//! Core types for playback control

use recmusic_core::PlaybackSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No queue, transport disabled
    Idle,

    /// Current track loaded but not playing
    Paused,

    /// Currently playing
    Playing,
}

/// Configuration for the playback controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Advancing before this position counts as a skip (default: 5s)
    pub skip_threshold: Duration,

    /// Delay between natural track end and auto-advance (default: 3s)
    pub auto_advance_delay: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            skip_threshold: Duration::from_secs(5),
            auto_advance_delay: Duration::from_secs(3),
        }
    }
}

impl From<&PlaybackSettings> for PlaybackConfig {
    fn from(settings: &PlaybackSettings) -> Self {
        Self {
            skip_threshold: settings.skip_threshold(),
            auto_advance_delay: settings.auto_advance_delay(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlaybackConfig::default();
        assert_eq!(config.skip_threshold, Duration::from_secs(5));
        assert_eq!(config.auto_advance_delay, Duration::from_secs(3));
    }

    #[test]
    fn config_from_settings() {
        let settings = PlaybackSettings {
            skip_threshold_secs: 8,
            auto_advance_delay_secs: 0,
        };

        let config = PlaybackConfig::from(&settings);
        assert_eq!(config.skip_threshold, Duration::from_secs(8));
        assert_eq!(config.auto_advance_delay, Duration::ZERO);
    }
}
