//! RecMusic - Playback Control
//!
//! Platform-agnostic preview player for RecMusic.
//!
//! This crate provides:
//! - A single current track over a host-supplied queue
//! - Play/pause toggle, seek, next and previous with wraparound
//! - External re-selection from a track list
//! - Skip detection (leaving a track before the skip threshold)
//! - Delayed auto-advance after a track finishes
//!
//! # Architecture
//!
//! The controller never touches audio or clocks directly:
//! - Audio goes through the [`AudioOutput`] trait
//! - Time enters as `Instant` arguments to `on_ended` and `poll`
//! - Analytics and UI observe [`PlaybackEvent`]s
//!
//! # Example
//!
//! ```rust
//! use recmusic_core::Track;
//! use recmusic_playback::{NullOutput, PlaybackConfig, PlaybackController, PlaybackState};
//! use std::time::{Duration, Instant};
//!
//! let queue = vec![
//!     Track::new("t1", "First Song", "Artist", "https://cdn.example.com/t1.mp3"),
//!     Track::new("t2", "Second Song", "Artist", "https://cdn.example.com/t2.mp3"),
//! ];
//!
//! let mut player = PlaybackController::mount(
//!     PlaybackConfig::default(),
//!     Box::new(NullOutput),
//!     queue,
//!     None,
//! );
//! assert_eq!(player.state(), PlaybackState::Playing);
//!
//! // Track ends, next one starts after the grace period
//! let ended = Instant::now();
//! player.on_ended(ended);
//! player.poll(ended + Duration::from_secs(3));
//! assert_eq!(player.current_index(), 1);
//! ```

pub mod controller;
pub mod error;
pub mod events;
pub mod output;
pub mod types;

pub use controller::{PlaybackController, NO_SONGS_MESSAGE};
pub use error::{PlaybackError, Result};
pub use events::{ChangeReason, PlaybackEvent, PlaybackListener};
pub use output::{AudioOutput, NullOutput};
pub use types::{PlaybackConfig, PlaybackState};
