use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

use super::controller::{OverlayController, OverlaySnapshot};
use super::input::{OverlayEvent, OverlayInput};
use super::timer::TimerScheduler;
use crate::config::OverlayConfig;
use crate::core::{Property, PropertySubscriber};
use crate::platforms::NowPlayingBridge;
use crate::player::PlaybackClock;
use crate::utils::OverlayResult;

/// Cloneable front door to a running overlay.
#[derive(Debug, Clone)]
pub struct OverlayHandle {
    sender: mpsc::UnboundedSender<OverlayInput>,
    snapshot: Property<OverlaySnapshot>,
    cancel: CancellationToken,
}

impl OverlayHandle {
    /// Queue an input. Returns false once the runtime has stopped.
    pub fn send(&self, input: OverlayInput) -> bool {
        self.sender.send(input).is_ok()
    }

    pub fn snapshot(&self) -> OverlaySnapshot {
        self.snapshot.get()
    }

    pub fn subscribe(&self) -> PropertySubscriber {
        self.snapshot.subscribe()
    }

    pub fn snapshot_property(&self) -> &Property<OverlaySnapshot> {
        &self.snapshot
    }

    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Owns the [`OverlayController`] and runs its event loop on one task.
///
/// Timer fires come back through the same channel as user input, so the
/// loop only ends on [`OverlayHandle::shutdown`].
pub struct OverlayRuntime {
    controller: OverlayController,
    receiver: mpsc::UnboundedReceiver<OverlayInput>,
    events: mpsc::UnboundedSender<OverlayEvent>,
    snapshot: Property<OverlaySnapshot>,
    cancel: CancellationToken,
}

impl OverlayRuntime {
    /// Build the runtime. Must be called inside a tokio runtime when the
    /// config starts the overlay visible, since that arms the idle timer.
    pub fn new(
        config: &OverlayConfig,
        clock: Box<dyn PlaybackClock>,
    ) -> OverlayResult<(
        OverlayHandle,
        OverlayRuntime,
        mpsc::UnboundedReceiver<OverlayEvent>,
    )> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let (event_sender, event_receiver) = mpsc::unbounded_channel();

        let controller = OverlayController::new(config, clock, TimerScheduler::new(sender.clone()))?;
        let snapshot = Property::new(controller.snapshot(), "overlay_snapshot");
        let cancel = CancellationToken::new();

        let handle = OverlayHandle {
            sender,
            snapshot: snapshot.clone(),
            cancel: cancel.clone(),
        };
        let runtime = OverlayRuntime {
            controller,
            receiver,
            events: event_sender,
            snapshot,
            cancel,
        };

        Ok((handle, runtime, event_receiver))
    }

    pub fn with_now_playing(mut self, bridge: Box<dyn NowPlayingBridge>) -> Self {
        self.controller = self.controller.with_now_playing(bridge);
        self
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Run the overlay event loop until shutdown.
    pub async fn run(mut self) {
        info!("Overlay runtime started");

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    debug!("Overlay runtime cancelled");
                    break;
                }
                input = self.receiver.recv() => {
                    let Some(input) = input else {
                        debug!("Overlay input channel closed");
                        break;
                    };
                    self.handle(input);
                }
            }
        }

        info!("Overlay runtime stopped");
    }

    fn handle(&mut self, input: OverlayInput) {
        for event in self.controller.dispatch(input) {
            trace!("Overlay event {:?}", event);
            if self.events.send(event).is_err() {
                trace!("No listener for overlay events");
            }
        }
        self.snapshot.set_if_changed(self.controller.snapshot());
    }
}
