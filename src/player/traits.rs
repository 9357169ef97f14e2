use crate::models::{ClockTick, PlaybackPosition};

/// The playback engine as seen by the overlay.
///
/// Commands are fire-and-forget: implementations must not block the caller
/// waiting for the engine to acknowledge. The overlay reads back whatever the
/// clock currently believes and reconciles on the next [`ClockTick`].
pub trait PlaybackClock: Send {
    fn position(&self) -> PlaybackPosition;
    fn is_playing(&self) -> bool;

    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, time: f64);
    fn skip(&mut self, delta: f64);
    fn set_rate(&mut self, rate: f64);

    /// Apply an externally observed tick. Engines that are their own source
    /// of truth can ignore it.
    fn observe(&mut self, _tick: ClockTick) {}

    fn current_time(&self) -> f64 {
        self.position().current_time
    }

    fn duration(&self) -> f64 {
        self.position().duration
    }
}
