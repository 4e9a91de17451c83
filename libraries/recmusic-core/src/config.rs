/// Client configuration
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default configuration file, read from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "recmusic.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecMusicConfig {
    #[serde(default = "default_api")]
    pub api: ApiSettings,

    #[serde(default = "default_activity")]
    pub activity: ActivitySettings,

    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActivitySettings {
    /// Seconds between flush cycles
    #[serde(default = "default_flush_interval_secs")]
    pub flush_interval_secs: u64,

    /// Oldest entries are dropped beyond this many; unbounded when unset
    #[serde(default)]
    pub max_queue_len: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    /// Advancing before this many seconds counts as a skip
    #[serde(default = "default_skip_threshold_secs")]
    pub skip_threshold_secs: u64,

    /// Pause after a track ends before the next one starts
    #[serde(default = "default_auto_advance_delay_secs")]
    pub auto_advance_delay_secs: u64,
}

impl RecMusicConfig {
    /// Load configuration from `recmusic.toml` (if present) and environment
    pub fn load() -> Result<Self> {
        Self::load_from(Some(Path::new(DEFAULT_CONFIG_FILE)))
    }

    /// Load configuration from an optional file and environment
    ///
    /// Environment variables are prefixed with `RECMUSIC_` and use `__` between
    /// sections, e.g. `RECMUSIC_ACTIVITY__FLUSH_INTERVAL_SECS=30`.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            if path.exists() {
                settings = settings.add_source(config::File::from(PathBuf::from(path)));
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("RECMUSIC")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(CoreError::config("api.base_url must not be empty"));
        }

        if self.activity.flush_interval_secs == 0 {
            return Err(CoreError::config(
                "activity.flush_interval_secs must be greater than zero",
            ));
        }

        Ok(())
    }
}

impl ActivitySettings {
    pub fn flush_interval(&self) -> Duration {
        Duration::from_secs(self.flush_interval_secs)
    }
}

impl PlaybackSettings {
    pub fn skip_threshold(&self) -> Duration {
        Duration::from_secs(self.skip_threshold_secs)
    }

    pub fn auto_advance_delay(&self) -> Duration {
        Duration::from_secs(self.auto_advance_delay_secs)
    }
}

// Default values
fn default_api() -> ApiSettings {
    ApiSettings {
        base_url: default_base_url(),
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_activity() -> ActivitySettings {
    ActivitySettings {
        flush_interval_secs: default_flush_interval_secs(),
        max_queue_len: None,
    }
}

fn default_flush_interval_secs() -> u64 {
    10
}

fn default_playback() -> PlaybackSettings {
    PlaybackSettings {
        skip_threshold_secs: default_skip_threshold_secs(),
        auto_advance_delay_secs: default_auto_advance_delay_secs(),
    }
}

fn default_skip_threshold_secs() -> u64 {
    5
}

fn default_auto_advance_delay_secs() -> u64 {
    3
}

impl Default for RecMusicConfig {
    fn default() -> Self {
        Self {
            api: default_api(),
            activity: default_activity(),
            playback: default_playback(),
        }
    }
}

impl Default for ActivitySettings {
    fn default() -> Self {
        default_activity()
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        default_playback()
    }
}
