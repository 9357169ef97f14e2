use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::trace;

use super::OverlayInput;

/// Spawns delayed deliveries of [`OverlayInput`] back into the event loop.
#[derive(Debug, Clone)]
pub struct TimerScheduler {
    sender: mpsc::UnboundedSender<OverlayInput>,
}

impl TimerScheduler {
    pub fn new(sender: mpsc::UnboundedSender<OverlayInput>) -> Self {
        Self { sender }
    }

    /// Deliver `input` after `delay`. Must be called from within a tokio
    /// runtime.
    pub fn schedule(&self, delay: Duration, input: OverlayInput) -> DelayedTask {
        let sender = self.sender.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = sender.send(input);
        });
        DelayedTask { handle }
    }
}

/// A pending delivery. Dropping it aborts the task.
#[derive(Debug)]
pub struct DelayedTask {
    handle: JoinHandle<()>,
}

impl Drop for DelayedTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Holds at most one armed timer and the ticket it was armed with.
///
/// Aborting a task cannot recall a message it already queued, so every fire
/// carries its ticket and only the latest one is honored.
#[derive(Debug, Default)]
pub struct TimerSlot {
    next_ticket: u64,
    armed: Option<(u64, DelayedTask)>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel whatever is pending and schedule a replacement.
    pub fn arm<F>(&mut self, scheduler: &TimerScheduler, delay: Duration, make_input: F) -> u64
    where
        F: FnOnce(u64) -> OverlayInput,
    {
        self.cancel();
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        let task = scheduler.schedule(delay, make_input(ticket));
        trace!("Armed timer ticket {} for {:?}", ticket, delay);
        self.armed = Some((ticket, task));
        ticket
    }

    pub fn cancel(&mut self) {
        if let Some((ticket, _task)) = self.armed.take() {
            trace!("Cancelled timer ticket {}", ticket);
        }
    }

    /// Consume a fired ticket. Returns false for stale or cancelled fires.
    pub fn claim(&mut self, ticket: u64) -> bool {
        match self.armed {
            Some((armed, _)) if armed == ticket => {
                self.armed = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}
