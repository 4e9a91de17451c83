//! Playback Events
//!
//! Typed notifications emitted by the controller. Listeners (such as the
//! activity batcher) subscribe instead of being called directly, and the UI
//! can poll the same events with `drain_events`.

use crate::types::PlaybackState;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Why the current track changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeReason {
    /// Host selected a track from a list
    Selected,
    /// User pressed next
    Next,
    /// User pressed previous
    Previous,
    /// Previous track finished and the grace period elapsed
    AutoAdvance,
    /// Host replaced the queue
    QueueReplaced,
}

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Transport state changed
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// Current track changed for any reason
    TrackChanged {
        /// ID of the new current track
        track_id: String,
        /// ID of the previous track (if any)
        previous_track_id: Option<String>,
        /// What caused the change
        reason: ChangeReason,
    },

    /// User started a track from a list (reported as "play")
    TrackStarted {
        /// ID of the selected track
        track_id: String,
    },

    /// User advanced before the skip threshold (reported as "skip")
    TrackSkipped {
        /// ID of the skipped track
        track_id: String,
        /// Listening position when skipped
        position: Duration,
    },

    /// Track reached its natural end
    TrackFinished {
        /// ID of the finished track
        track_id: String,
    },

    /// Duration became known or position moved
    PositionUpdate {
        position: Duration,
        duration: Duration,
    },

    /// Queue replaced by the host
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Audio output rejected a command
    Error {
        /// Error message
        message: String,
    },
}

/// Subscriber to playback events
///
/// Called synchronously from the controller, so implementations must not
/// block.
pub trait PlaybackListener: Send + Sync {
    fn on_playback_event(&self, event: &PlaybackEvent);
}

impl<F> PlaybackListener for F
where
    F: Fn(&PlaybackEvent) + Send + Sync,
{
    fn on_playback_event(&self, event: &PlaybackEvent) {
        self(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn closures_are_listeners() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let listener = move |event: &PlaybackEvent| sink.lock().unwrap().push(event.clone());

        listener.on_playback_event(&PlaybackEvent::QueueChanged { length: 2 });

        assert_eq!(
            *seen.lock().unwrap(),
            vec![PlaybackEvent::QueueChanged { length: 2 }]
        );
    }
}
