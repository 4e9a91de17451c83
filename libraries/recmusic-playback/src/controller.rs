//! Playback controller - core orchestration
//!
//! Owns the current track over a host-supplied queue and drives an
//! [`AudioOutput`]. Time only enters through explicit `Instant` arguments, so
//! the controller is a plain state machine the host's event loop can poke.

use crate::{
    error::{PlaybackError, Result},
    events::{ChangeReason, PlaybackEvent, PlaybackListener},
    output::AudioOutput,
    types::{PlaybackConfig, PlaybackState},
};
use recmusic_core::Track;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Shown by hosts when the queue is empty
pub const NO_SONGS_MESSAGE: &str = "No songs available";

/// Playback controller
///
/// Maintains exactly one current track over the queue:
/// - Transport (play/pause toggle, seek, next, previous with wraparound)
/// - External re-selection from a track list
/// - Skip detection for analytics
/// - Delayed auto-advance after a track finishes
pub struct PlaybackController {
    config: PlaybackConfig,
    output: Box<dyn AudioOutput>,

    // Session
    queue: Vec<Track>,
    current_index: usize,
    state: PlaybackState,
    position: Duration,
    duration: Duration,

    // Set by `on_ended`, fired by `poll`
    auto_advance_at: Option<Instant>,

    listeners: Vec<Arc<dyn PlaybackListener>>,
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackController {
    /// Create an idle controller with no queue
    pub fn new(config: PlaybackConfig, output: Box<dyn AudioOutput>) -> Self {
        Self {
            config,
            output,
            queue: Vec::new(),
            current_index: 0,
            state: PlaybackState::Idle,
            position: Duration::ZERO,
            duration: Duration::ZERO,
            auto_advance_at: None,
            listeners: Vec::new(),
            pending_events: Vec::new(),
        }
    }

    /// Create a controller for a queue and an optional selected track
    ///
    /// A selected track found in the queue becomes current, starts paused
    /// and is reported as started; otherwise the first track starts playing.
    pub fn mount(
        config: PlaybackConfig,
        output: Box<dyn AudioOutput>,
        queue: Vec<Track>,
        selected: Option<&Track>,
    ) -> Self {
        Self::mount_with_listeners(config, output, Vec::new(), queue, selected)
    }

    /// Like [`mount`](Self::mount), with listeners subscribed before the
    /// first event is emitted
    pub fn mount_with_listeners(
        config: PlaybackConfig,
        output: Box<dyn AudioOutput>,
        listeners: Vec<Arc<dyn PlaybackListener>>,
        queue: Vec<Track>,
        selected: Option<&Track>,
    ) -> Self {
        let mut controller = Self::new(config, output);
        controller.listeners = listeners;
        if queue.is_empty() {
            return controller;
        }

        let selected_index = selected.and_then(|track| {
            let index = find_track(&queue, &track.track_id);
            if index.is_none() {
                warn!(track_id = %track.track_id, "Selected track not found in queue");
            }
            index
        });

        controller.queue = queue;
        controller.emit(PlaybackEvent::QueueChanged {
            length: controller.queue.len(),
        });

        match selected_index {
            Some(index) => {
                controller.switch_to(
                    index,
                    None,
                    ChangeReason::Selected,
                    PlaybackState::Paused,
                );
                let track_id = controller.queue[index].track_id.clone();
                controller.emit(PlaybackEvent::TrackStarted { track_id });
            }
            None => controller.switch_to(
                0,
                None,
                ChangeReason::QueueReplaced,
                PlaybackState::Playing,
            ),
        }
        controller
    }

    /// Subscribe a listener to all future events
    pub fn subscribe(&mut self, listener: Arc<dyn PlaybackListener>) {
        self.listeners.push(listener);
    }

    // ===== Host input =====

    /// Replace the queue supplied by the host
    ///
    /// An empty queue makes the controller idle. If the current index falls
    /// outside a shrunk queue it resets to the first track.
    pub fn set_queue(&mut self, tracks: Vec<Track>) {
        let previous_track_id = self.current_track().map(|t| t.track_id.clone());
        let was_idle = self.state == PlaybackState::Idle;

        self.queue = tracks;
        self.emit(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
        });

        if self.queue.is_empty() {
            self.go_idle();
            return;
        }

        if self.current_index >= self.queue.len() {
            debug!(
                index = self.current_index,
                len = self.queue.len(),
                "Current index out of bounds, resetting"
            );
            self.current_index = 0;
        }

        if was_idle {
            self.switch_to(
                self.current_index,
                None,
                ChangeReason::QueueReplaced,
                PlaybackState::Playing,
            );
        } else if previous_track_id.as_deref()
            != Some(self.queue[self.current_index].track_id.as_str())
        {
            self.switch_to(
                self.current_index,
                previous_track_id,
                ChangeReason::QueueReplaced,
                self.state,
            );
        }
    }

    /// Make a track from the host's list current
    ///
    /// The track is matched by `track_id` and loaded paused. A track missing
    /// from the queue leaves the session untouched.
    pub fn select(&mut self, track: &Track) -> Result<()> {
        let Some(index) = find_track(&self.queue, &track.track_id) else {
            warn!(track_id = %track.track_id, "Selected track not found in queue");
            return Err(PlaybackError::TrackNotInQueue(track.track_id.clone()));
        };

        if index == self.current_index {
            self.auto_advance_at = None;
            self.set_state(PlaybackState::Paused);
        } else {
            let previous_track_id = self.current_track().map(|t| t.track_id.clone());
            self.switch_to(
                index,
                previous_track_id,
                ChangeReason::Selected,
                PlaybackState::Paused,
            );
        }

        self.emit(PlaybackEvent::TrackStarted {
            track_id: track.track_id.clone(),
        });
        Ok(())
    }

    // ===== Transport =====

    /// Toggle between playing and paused
    pub fn toggle_playback(&mut self) {
        match self.state {
            PlaybackState::Playing => self.set_state(PlaybackState::Paused),
            PlaybackState::Paused => self.set_state(PlaybackState::Playing),
            PlaybackState::Idle => {}
        }
    }

    /// Move the playhead without changing play state
    ///
    /// Values outside `0..=duration` are passed through; clamping is the
    /// host's job.
    pub fn seek(&mut self, position: Duration) {
        if self.state == PlaybackState::Idle {
            return;
        }

        self.command(|output| output.set_position(position));
        self.position = position;
        self.emit(PlaybackEvent::PositionUpdate {
            position,
            duration: self.duration,
        });
    }

    /// Skip to the next track, wrapping to the first
    ///
    /// Leaving a track before the skip threshold reports a skip.
    pub fn next(&mut self) {
        if self.queue.is_empty() {
            return;
        }

        // A finished track waiting on auto-advance was not skipped
        if self.auto_advance_at.is_none() && self.position < self.config.skip_threshold {
            if let Some(track) = self.current_track() {
                let event = PlaybackEvent::TrackSkipped {
                    track_id: track.track_id.clone(),
                    position: self.position,
                };
                self.emit(event);
            }
        }

        self.advance(ChangeReason::Next);
    }

    /// Go to the previous track, wrapping to the last
    pub fn previous(&mut self) {
        if self.queue.is_empty() {
            return;
        }

        let index = if self.current_index == 0 {
            self.queue.len() - 1
        } else {
            self.current_index - 1
        };
        let previous_track_id = self.current_track().map(|t| t.track_id.clone());
        self.switch_to(
            index,
            previous_track_id,
            ChangeReason::Previous,
            PlaybackState::Playing,
        );
    }

    // ===== Output callbacks =====

    /// Output learned the duration of the current resource
    pub fn on_metadata_loaded(&mut self, duration: Duration) {
        self.duration = duration;
        self.emit(PlaybackEvent::PositionUpdate {
            position: self.position,
            duration,
        });
    }

    /// Output playhead moved
    pub fn on_time_update(&mut self, position: Duration) {
        self.position = position;
    }

    /// Current track reached its end
    ///
    /// The next track starts once `poll` is called after the grace period.
    pub fn on_ended(&mut self, now: Instant) {
        let Some(track) = self.current_track() else {
            return;
        };

        let track_id = track.track_id.clone();
        self.position = self.duration.max(self.position);
        self.auto_advance_at = Some(now + self.config.auto_advance_delay);
        self.emit(PlaybackEvent::TrackFinished { track_id });
    }

    /// Fire a due auto-advance
    ///
    /// Returns true if the controller moved to the next track.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.auto_advance_at {
            Some(at) if now >= at && !self.queue.is_empty() => {
                self.auto_advance_at = None;
                self.advance(ChangeReason::AutoAdvance);
                true
            }
            _ => false,
        }
    }

    // ===== State Queries =====

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Transport is enabled (queue is non-empty)
    pub fn is_available(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Terminal message to show instead of the player, if any
    pub fn status_message(&self) -> Option<&'static str> {
        (!self.is_available()).then_some(NO_SONGS_MESSAGE)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.queue.get(self.current_index)
    }

    pub fn queue(&self) -> &[Track] {
        &self.queue
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    /// Duration of the current track, zero until metadata is loaded
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Position as a fraction of the duration (0.0 - 1.0)
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 0.0;
        }
        (self.position.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0) as f32
    }

    /// Whole-second timer label, e.g. "7 / 10 sec"
    pub fn position_label(&self) -> String {
        format!(
            "{} / {} sec",
            self.position.as_secs(),
            self.duration.as_secs()
        )
    }

    /// Auto-advance is scheduled
    pub fn has_pending_advance(&self) -> bool {
        self.auto_advance_at.is_some()
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    fn advance(&mut self, reason: ChangeReason) {
        let index = if self.current_index + 1 >= self.queue.len() {
            0
        } else {
            self.current_index + 1
        };
        let previous_track_id = self.current_track().map(|t| t.track_id.clone());
        self.switch_to(index, previous_track_id, reason, PlaybackState::Playing);
    }

    /// Load the track at `index` and issue the transport command for `state`
    fn switch_to(
        &mut self,
        index: usize,
        previous_track_id: Option<String>,
        reason: ChangeReason,
        state: PlaybackState,
    ) {
        self.current_index = index;
        self.position = Duration::ZERO;
        self.duration = Duration::ZERO;
        self.auto_advance_at = None;

        let track = &self.queue[index];
        let track_id = track.track_id.clone();
        let url = track.preview_url.clone();

        debug!(track_id = %track_id, index, reason = ?reason, "Switching track");
        self.command(|output| output.load(&url));
        self.emit(PlaybackEvent::TrackChanged {
            track_id,
            previous_track_id,
            reason,
        });

        let changed = self.state != state;
        self.state = state;
        self.issue_transport();
        if changed {
            self.emit(PlaybackEvent::StateChanged { state });
        }
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state == state {
            return;
        }
        self.state = state;
        self.issue_transport();
        self.emit(PlaybackEvent::StateChanged { state });
    }

    fn issue_transport(&mut self) {
        match self.state {
            PlaybackState::Playing => self.command(|output| output.play()),
            PlaybackState::Paused => self.command(|output| output.pause()),
            PlaybackState::Idle => {}
        }
    }

    fn go_idle(&mut self) {
        self.current_index = 0;
        self.position = Duration::ZERO;
        self.duration = Duration::ZERO;
        self.auto_advance_at = None;

        if self.state != PlaybackState::Idle {
            self.command(|output| output.stop());
            self.state = PlaybackState::Idle;
            self.emit(PlaybackEvent::StateChanged {
                state: PlaybackState::Idle,
            });
        }
    }

    /// Run an output command; failures are reported, never propagated
    fn command<F>(&mut self, f: F)
    where
        F: FnOnce(&mut dyn AudioOutput) -> Result<()>,
    {
        if let Err(e) = f(self.output.as_mut()) {
            warn!(error = %e, "Audio output command failed");
            self.emit(PlaybackEvent::Error {
                message: e.to_string(),
            });
        }
    }

    fn emit(&mut self, event: PlaybackEvent) {
        for listener in &self.listeners {
            listener.on_playback_event(&event);
        }
        self.pending_events.push(event);
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.output.release();
    }
}

fn find_track(queue: &[Track], track_id: &str) -> Option<usize> {
    queue.iter().position(|t| t.track_id == track_id)
}
