//! Platform-agnostic audio output trait
//!
//! Abstracts the element that actually plays preview audio (a browser audio
//! element, a desktop sink, a test double).

use crate::error::Result;
use std::time::Duration;

/// Audio output driven by the playback controller
///
/// The output reports back through the controller's `on_metadata_loaded`,
/// `on_time_update` and `on_ended` callbacks; this trait only carries
/// commands in the other direction.
pub trait AudioOutput: Send {
    /// Load a new preview URL, replacing the current resource
    fn load(&mut self, url: &str) -> Result<()>;

    /// Start or resume playback
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self) -> Result<()>;

    /// Move the playhead
    fn set_position(&mut self, position: Duration) -> Result<()>;

    /// Stop playback and unload the resource
    fn stop(&mut self) -> Result<()> {
        self.pause()
    }

    /// Release the output and drop all event subscriptions
    ///
    /// Called exactly once, when the controller is dropped.
    fn release(&mut self) {}
}

/// Output that accepts every command and plays nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullOutput;

impl AudioOutput for NullOutput {
    fn load(&mut self, _url: &str) -> Result<()> {
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        Ok(())
    }

    fn set_position(&mut self, _position: Duration) -> Result<()> {
        Ok(())
    }
}

/// Recording output for unit tests
#[cfg(test)]
pub(crate) mod recording {
    use super::*;
    use crate::error::PlaybackError;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Load(String),
        Play,
        Pause,
        SetPosition(Duration),
        Stop,
        Release,
    }

    #[derive(Clone, Default)]
    pub struct RecordingOutput {
        pub calls: Arc<Mutex<Vec<Call>>>,
        pub fail_play: bool,
    }

    impl RecordingOutput {
        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn push(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl AudioOutput for RecordingOutput {
        fn load(&mut self, url: &str) -> Result<()> {
            self.push(Call::Load(url.to_string()));
            Ok(())
        }

        fn play(&mut self) -> Result<()> {
            self.push(Call::Play);
            if self.fail_play {
                return Err(PlaybackError::Output("autoplay blocked".into()));
            }
            Ok(())
        }

        fn pause(&mut self) -> Result<()> {
            self.push(Call::Pause);
            Ok(())
        }

        fn set_position(&mut self, position: Duration) -> Result<()> {
            self.push(Call::SetPosition(position));
            Ok(())
        }

        fn stop(&mut self) -> Result<()> {
            self.push(Call::Stop);
            Ok(())
        }

        fn release(&mut self) {
            self.push(Call::Release);
        }
    }
}
