use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace};

use super::OverlayInput;
use super::timer::{TimerScheduler, TimerSlot};
use crate::config::ScrubConfig;
use crate::models::PlaybackPosition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepDirection {
    Backward,
    Forward,
}

impl StepDirection {
    fn sign(self) -> f64 {
        match self {
            StepDirection::Backward => -1.0,
            StepDirection::Forward => 1.0,
        }
    }
}

/// What opened the session, which decides how it ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrubOrigin {
    /// Touch drag, committed on release
    Gesture,
    /// Directional stepping, committed after the debounce window
    Step,
}

/// A tentative seek target being adjusted before commit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrubSession {
    pub origin: ScrubOrigin,
    pub start_value: f64,
    pub pending_value: f64,
}

/// Turns drag deltas and directional steps into seek commits.
///
/// Methods that finish a session return the value to seek to; the caller
/// forwards it to the playback clock. At most one debounce commit is pending
/// at any time.
#[derive(Debug)]
pub struct ScrubController {
    session: Option<ScrubSession>,
    commit_timer: TimerSlot,
    scheduler: TimerScheduler,
    debounce: Duration,
    step_divisor: f64,
    min_step: f64,
}

impl ScrubController {
    pub fn new(config: &ScrubConfig, scheduler: TimerScheduler) -> Self {
        Self {
            session: None,
            commit_timer: TimerSlot::new(),
            scheduler,
            debounce: Duration::from_millis(config.debounce_ms),
            step_divisor: config.step_divisor,
            min_step: config.min_step_secs,
        }
    }

    pub fn session(&self) -> Option<&ScrubSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// True while a directional editing session is open.
    pub fn is_editing(&self) -> bool {
        matches!(self.session, Some(ScrubSession { origin: ScrubOrigin::Step, .. }))
    }

    pub fn has_pending_commit(&self) -> bool {
        self.commit_timer.is_armed()
    }

    /// Scrubbing needs a known length; with none, every target clamps to 0.
    fn can_scrub(position: PlaybackPosition) -> bool {
        if position.duration > 0.0 {
            return true;
        }
        trace!("Duration unknown, ignoring scrub input");
        false
    }

    pub fn step_size(&self, duration: f64) -> f64 {
        (duration / self.step_divisor).max(self.min_step)
    }

    /// Start a drag. A directional session still open is committed first and
    /// its value returned.
    pub fn begin_gesture(&mut self, position: PlaybackPosition) -> Option<f64> {
        let flushed = self.commit_now();
        if !Self::can_scrub(position) {
            return flushed;
        }
        debug!("Scrub gesture started at {:.2}s", position.current_time);
        self.session = Some(ScrubSession {
            origin: ScrubOrigin::Gesture,
            start_value: position.current_time,
            pending_value: position.current_time,
        });
        flushed
    }

    /// Apply a drag expressed as a fraction of the track width.
    pub fn update_gesture(
        &mut self,
        normalized_delta: f64,
        position: PlaybackPosition,
    ) -> Option<f64> {
        let session = self.session.as_mut()?;
        if session.origin != ScrubOrigin::Gesture {
            return None;
        }
        let proposed = session.start_value + normalized_delta * position.duration;
        session.pending_value = position.clamp(proposed);
        trace!("Scrub gesture pending {:.2}s", session.pending_value);
        Some(session.pending_value)
    }

    /// Release: commit immediately.
    pub fn end_gesture(&mut self) -> Option<f64> {
        match self.session {
            Some(ScrubSession {
                origin: ScrubOrigin::Gesture,
                ..
            }) => self.commit_now(),
            _ => None,
        }
    }

    /// Open a directional editing session without moving (activation on the
    /// scrubber). The debounce window still closes it.
    pub fn begin_editing(&mut self, position: PlaybackPosition) {
        if self.session.is_some() || !Self::can_scrub(position) {
            return;
        }
        debug!("Scrub editing started at {:.2}s", position.current_time);
        self.session = Some(ScrubSession {
            origin: ScrubOrigin::Step,
            start_value: position.current_time,
            pending_value: position.current_time,
        });
        self.arm_commit();
    }

    /// One directional step. Enters editing mode on the first step and
    /// restarts the debounce window on every step.
    pub fn step(&mut self, direction: StepDirection, position: PlaybackPosition) -> Option<f64> {
        if self.session.is_none() && !Self::can_scrub(position) {
            return None;
        }
        let step = self.step_size(position.duration);
        let session = self.session.get_or_insert_with(|| {
            debug!("Scrub editing started at {:.2}s", position.current_time);
            ScrubSession {
                origin: ScrubOrigin::Step,
                start_value: position.current_time,
                pending_value: position.current_time,
            }
        });
        if session.origin != ScrubOrigin::Step {
            // Directional input does not steer a drag in progress
            return None;
        }
        session.pending_value = position.clamp(session.pending_value + direction.sign() * step);
        let pending = session.pending_value;
        trace!("Scrub step {:?} pending {:.2}s", direction, pending);
        self.arm_commit();
        Some(pending)
    }

    /// Debounce window elapsed. Stale tickets are ignored.
    pub fn commit_due(&mut self, ticket: u64) -> Option<f64> {
        if !self.commit_timer.claim(ticket) {
            trace!("Ignoring stale scrub commit ticket {}", ticket);
            return None;
        }
        self.commit_now()
    }

    /// End the session now (release, focus loss, overlay hidden) and return
    /// its last value. Never discards a pending value.
    pub fn commit_now(&mut self) -> Option<f64> {
        self.commit_timer.cancel();
        let session = self.session.take()?;
        debug!(
            "Scrub committed {:.2}s (started at {:.2}s)",
            session.pending_value, session.start_value
        );
        Some(session.pending_value)
    }

    /// Value the progress bar should show.
    pub fn progress(&self, position: PlaybackPosition) -> f64 {
        self.session
            .map(|session| session.pending_value)
            .unwrap_or(position.current_time)
    }

    pub fn progress_fraction(&self, position: PlaybackPosition) -> f64 {
        position.fraction_of(self.progress(position))
    }

    fn arm_commit(&mut self) {
        self.commit_timer.arm(&self.scheduler, self.debounce, |ticket| {
            OverlayInput::ScrubCommitDue { ticket }
        });
    }
}
