use playback_overlay::models::{ClockTick, PlaybackPosition};
use playback_overlay::platforms::{NowPlayingBridge, NowPlayingMetadata, PlaybackStatus};
use playback_overlay::player::PlaybackClock;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub enum ClockCall {
    Play,
    Pause,
    Seek(f64),
    Skip(f64),
    SetRate(f64),
}

/// Playback engine double that applies commands immediately and records
/// them. Clones share state, so a test keeps one clone and hands the other
/// to the overlay.
#[derive(Clone)]
pub struct RecordingClock {
    pub position: Arc<Mutex<PlaybackPosition>>,
    pub playing: Arc<Mutex<bool>>,
    pub calls: Arc<Mutex<Vec<ClockCall>>>,
}

impl RecordingClock {
    pub fn new(current_time: f64, duration: f64, playing: bool) -> Self {
        Self {
            position: Arc::new(Mutex::new(PlaybackPosition::new(current_time, duration))),
            playing: Arc::new(Mutex::new(playing)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<ClockCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn seeks(&self) -> Vec<f64> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ClockCall::Seek(time) => Some(time),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: ClockCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl PlaybackClock for RecordingClock {
    fn position(&self) -> PlaybackPosition {
        *self.position.lock().unwrap()
    }

    fn is_playing(&self) -> bool {
        *self.playing.lock().unwrap()
    }

    fn play(&mut self) {
        *self.playing.lock().unwrap() = true;
        self.record(ClockCall::Play);
    }

    fn pause(&mut self) {
        *self.playing.lock().unwrap() = false;
        self.record(ClockCall::Pause);
    }

    fn seek(&mut self, time: f64) {
        {
            let mut position = self.position.lock().unwrap();
            position.current_time = position.clamp(time);
        }
        self.record(ClockCall::Seek(time));
    }

    fn skip(&mut self, delta: f64) {
        {
            let mut position = self.position.lock().unwrap();
            position.current_time = position.clamp(position.current_time + delta);
        }
        self.record(ClockCall::Skip(delta));
    }

    fn set_rate(&mut self, rate: f64) {
        self.record(ClockCall::SetRate(rate));
    }

    fn observe(&mut self, tick: ClockTick) {
        *self.position.lock().unwrap() = tick.position;
        *self.playing.lock().unwrap() = tick.is_playing;
    }
}

#[derive(Clone, Default)]
pub struct RecordingBridge {
    pub metadata: Arc<Mutex<Vec<NowPlayingMetadata>>>,
    pub statuses: Arc<Mutex<Vec<PlaybackStatus>>>,
}

impl RecordingBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_status(&self) -> Option<PlaybackStatus> {
        self.statuses.lock().unwrap().last().copied()
    }

    pub fn metadata(&self) -> Vec<NowPlayingMetadata> {
        self.metadata.lock().unwrap().clone()
    }
}

impl NowPlayingBridge for RecordingBridge {
    fn publish_metadata(&mut self, metadata: &NowPlayingMetadata) {
        self.metadata.lock().unwrap().push(metadata.clone());
    }

    fn publish_status(&mut self, status: &PlaybackStatus) {
        self.statuses.lock().unwrap().push(*status);
    }
}
