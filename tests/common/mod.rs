pub mod mocks;

use playback_overlay::OverlayConfig;
use playback_overlay::overlay::{
    Direction, InputMode, OverlayController, OverlayEvent, OverlayInput, TimerScheduler,
};
use tokio::sync::mpsc;

pub use mocks::{ClockCall, RecordingBridge, RecordingClock};

/// Controller plus the loopback channel its timers fire into.
pub struct TestOverlay {
    pub overlay: OverlayController,
    pub clock: RecordingClock,
    timers: mpsc::UnboundedReceiver<OverlayInput>,
}

impl TestOverlay {
    pub fn new(mode: InputMode, clock: RecordingClock) -> Self {
        let config = OverlayConfig {
            input_mode: mode,
            ..Default::default()
        };
        Self::with_config(&config, clock)
    }

    pub fn with_config(config: &OverlayConfig, clock: RecordingClock) -> Self {
        let (tx, timers) = mpsc::unbounded_channel();
        let overlay =
            OverlayController::new(config, Box::new(clock.clone()), TimerScheduler::new(tx))
                .expect("valid test config");
        Self {
            overlay,
            clock,
            timers,
        }
    }

    pub fn dispatch(&mut self, input: OverlayInput) -> Vec<OverlayEvent> {
        self.overlay.dispatch(input)
    }

    pub fn press(&mut self, direction: Direction, times: usize) {
        for _ in 0..times {
            self.dispatch(OverlayInput::Press(direction));
        }
    }

    /// Deliver every timer that has fired so far, like the runtime loop.
    pub fn fire_timers(&mut self) -> Vec<OverlayEvent> {
        let mut events = Vec::new();
        while let Ok(input) = self.timers.try_recv() {
            events.extend(self.overlay.dispatch(input));
        }
        events
    }
}
