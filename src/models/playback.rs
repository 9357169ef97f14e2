use serde::{Deserialize, Serialize};

/// Position reported by the playback clock, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaybackPosition {
    pub current_time: f64,
    pub duration: f64,
}

impl PlaybackPosition {
    pub fn new(current_time: f64, duration: f64) -> Self {
        let duration = sanitize(duration);
        let mut current_time = sanitize(current_time);
        if duration > 0.0 {
            current_time = current_time.min(duration);
        }
        Self {
            current_time,
            duration,
        }
    }

    /// Clamp a proposed time into `[0, duration]`.
    pub fn clamp(&self, time: f64) -> f64 {
        if !time.is_finite() {
            return 0.0;
        }
        time.clamp(0.0, self.duration.max(0.0))
    }

    /// Fraction of `value` within `[0, duration]`, with the duration floored
    /// to one second so an unknown length never divides by zero.
    pub fn fraction_of(&self, value: f64) -> f64 {
        (value / self.duration.max(1.0)).clamp(0.0, 1.0)
    }
}

/// Periodic report from the clock, used to reconcile optimistic state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClockTick {
    pub position: PlaybackPosition,
    pub is_playing: bool,
}

impl ClockTick {
    pub fn new(current_time: f64, duration: f64, is_playing: bool) -> Self {
        Self {
            position: PlaybackPosition::new(current_time, duration),
            is_playing,
        }
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}
