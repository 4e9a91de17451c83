//! Activity batcher configuration

use recmusic_core::RecMusicConfig;
use std::time::Duration;

/// Batcher settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityConfig {
    /// Period of the flush timer (default: 10s)
    pub flush_interval: Duration,

    /// Drop the oldest entries beyond this many; unbounded when `None`
    pub max_queue_len: Option<usize>,
}

impl ActivityConfig {
    /// Extract batcher settings from the client configuration
    pub fn from_config(config: &RecMusicConfig) -> Self {
        Self {
            flush_interval: config.activity.flush_interval(),
            max_queue_len: config.activity.max_queue_len,
        }
    }

    /// Same settings with a different flush period
    pub fn with_flush_interval(mut self, flush_interval: Duration) -> Self {
        self.flush_interval = flush_interval;
        self
    }

    /// Same settings with a queue cap
    pub fn with_max_queue_len(mut self, max_queue_len: usize) -> Self {
        self.max_queue_len = Some(max_queue_len);
        self
    }
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            flush_interval: Duration::from_secs(10),
            max_queue_len: None,
        }
    }
}
