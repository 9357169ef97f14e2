use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::OverlayInput;
use super::timer::{TimerScheduler, TimerSlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Show/hide state of the whole control surface plus its idle deadline.
///
/// Hiding never touches the state of the controls themselves; the caller
/// decides what losing the surface means for focus and scrubbing.
#[derive(Debug)]
pub struct VisibilityCoordinator {
    state: Visibility,
    idle_timer: TimerSlot,
    scheduler: TimerScheduler,
    idle_timeout: Duration,
}

impl VisibilityCoordinator {
    pub fn new(idle_timeout: Duration, scheduler: TimerScheduler) -> Self {
        Self {
            state: Visibility::Hidden,
            idle_timer: TimerSlot::new(),
            scheduler,
            idle_timeout,
        }
    }

    pub fn state(&self) -> Visibility {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == Visibility::Visible
    }

    pub fn is_idle_armed(&self) -> bool {
        self.idle_timer.is_armed()
    }

    /// User activity: show the surface and push the idle deadline back.
    /// Returns true when this revealed a hidden surface.
    pub fn register_interaction(&mut self) -> bool {
        let revealed = self.state == Visibility::Hidden;
        if revealed {
            debug!("Controls shown by interaction");
        }
        self.state = Visibility::Visible;
        self.arm_idle();
        revealed
    }

    /// Idle deadline fired. Hides only if `can_hide` and the ticket is
    /// current; otherwise the surface stays up without a new deadline.
    pub fn idle_expired(&mut self, ticket: u64, can_hide: bool) -> bool {
        if !self.idle_timer.claim(ticket) || self.state == Visibility::Hidden {
            return false;
        }
        if !can_hide {
            debug!("Idle deadline reached but hiding is blocked, keeping controls visible");
            return false;
        }
        debug!("Controls hidden after idle timeout");
        self.state = Visibility::Hidden;
        true
    }

    /// Arm the deadline if the surface is up and nothing is pending, e.g.
    /// when playback resumes after the previous deadline was skipped.
    pub fn ensure_armed(&mut self) {
        if self.is_visible() && !self.idle_timer.is_armed() {
            self.arm_idle();
        }
    }

    /// Explicit override. Returns true when the state changed.
    pub fn set_visible(&mut self, visible: bool) -> bool {
        let target = if visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        let changed = self.state != target;
        self.state = target;
        if visible {
            self.arm_idle();
        } else {
            self.idle_timer.cancel();
        }
        if changed {
            debug!("Controls forced {:?}", target);
        }
        changed
    }

    pub fn toggle(&mut self) -> Visibility {
        let visible = !self.is_visible();
        self.set_visible(visible);
        self.state
    }

    fn arm_idle(&mut self) {
        self.idle_timer
            .arm(&self.scheduler, self.idle_timeout, |ticket| OverlayInput::IdleTimeout {
                ticket,
            });
    }
}
