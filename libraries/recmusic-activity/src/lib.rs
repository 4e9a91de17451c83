//! RecMusic - Activity Reporting
//!
//! Batches user interactions (plays, likes, skips, playlist edits) and
//! delivers them to the recommender's activity collector.
//!
//! # Architecture
//!
//! - [`ActivityBatcher`] owns the in-memory queue and the flush timer
//! - [`ActivityConsumer`] handles keep the timer alive while UI is mounted
//! - [`ActivityCollector`] is the delivery seam; [`HttpActivityCollector`]
//!   posts to `/api/recommender/useractivity/`
//! - The batcher is a [`recmusic_playback::PlaybackListener`], so plays and
//!   skips are recorded by subscribing it to the playback controller
//!
//! Entries leave the queue only when the collector accepts them. Failed or
//! unauthenticated flushes keep everything for the next cycle.
//!
//! # Example
//!
//! ```no_run
//! use recmusic_activity::{ActivityBatcher, ActivityConfig, HttpActivityCollector};
//! use recmusic_core::{ActivityKind, CookieSessionStore};
//! use std::sync::Arc;
//!
//! # async fn run() -> recmusic_activity::Result<()> {
//! let collector = HttpActivityCollector::new("http://localhost:8000")?;
//! let session = Arc::new(CookieSessionStore::new());
//! let batcher = ActivityBatcher::new(ActivityConfig::default(), Arc::new(collector), session);
//!
//! let _consumer = batcher.attach();
//! batcher.record(ActivityKind::Like, Some("TR123"));
//! batcher.flush().await;
//! # Ok(())
//! # }
//! ```

pub mod batcher;
pub mod collector;
pub mod config;
pub mod error;

pub use batcher::{ActivityBatcher, ActivityConsumer, FlushOutcome};
pub use collector::{ActivityBatch, ActivityCollector, HttpActivityCollector, USER_ACTIVITY_PATH};
pub use config::ActivityConfig;
pub use error::{ActivityError, Result};
