use tokio::sync::mpsc;
use tracing::{trace, warn};

use super::PlaybackClock;
use crate::models::{ClockTick, PlaybackPosition};

/// Commands forwarded to the playback engine
#[derive(Debug, Clone, PartialEq)]
pub enum ClockCommand {
    /// Start playback
    Play,
    /// Pause playback
    Pause,
    /// Seek to an absolute position in seconds
    Seek(f64),
    /// Move relative to the current position
    Skip(f64),
    /// Set playback speed multiplier
    SetRate(f64),
}

/// Channel-backed [`PlaybackClock`].
///
/// Every command is sent to the engine task without waiting, and the cached
/// position is updated optimistically so the overlay shows the intended
/// state until the next [`ClockTick`] arrives.
#[derive(Debug)]
pub struct ClockHandle {
    sender: mpsc::UnboundedSender<ClockCommand>,
    position: PlaybackPosition,
    is_playing: bool,
    rate: f64,
}

impl ClockHandle {
    pub fn new() -> (ClockHandle, mpsc::UnboundedReceiver<ClockCommand>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let handle = ClockHandle {
            sender,
            position: PlaybackPosition::default(),
            is_playing: false,
            rate: 1.0,
        };
        (handle, receiver)
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    fn send(&self, command: ClockCommand) {
        trace!("Sending clock command {:?}", command);
        if self.sender.send(command).is_err() {
            warn!("Playback engine is gone, dropping clock command");
        }
    }
}

impl PlaybackClock for ClockHandle {
    fn position(&self) -> PlaybackPosition {
        self.position
    }

    fn is_playing(&self) -> bool {
        self.is_playing
    }

    fn play(&mut self) {
        self.is_playing = true;
        self.send(ClockCommand::Play);
    }

    fn pause(&mut self) {
        self.is_playing = false;
        self.send(ClockCommand::Pause);
    }

    fn seek(&mut self, time: f64) {
        self.position.current_time = self.position.clamp(time);
        self.send(ClockCommand::Seek(time));
    }

    fn skip(&mut self, delta: f64) {
        self.position.current_time = self.position.clamp(self.position.current_time + delta);
        self.send(ClockCommand::Skip(delta));
    }

    fn set_rate(&mut self, rate: f64) {
        self.rate = rate;
        self.send(ClockCommand::SetRate(rate));
    }

    fn observe(&mut self, tick: ClockTick) {
        self.position = tick.position;
        self.is_playing = tick.is_playing;
    }
}
