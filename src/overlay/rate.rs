use tracing::{debug, warn};

use crate::constants::RATE_EPSILON;
use crate::utils::{OverlayError, OverlayResult};

/// Menu label for a rate multiplier, e.g. `0.5` -> `"50%"`.
pub fn rate_label(rate: f64) -> String {
    format!("{}%", (rate * 100.0).round() as i64)
}

fn same_rate(a: f64, b: f64) -> bool {
    (a - b).abs() < RATE_EPSILON
}

/// Current playback speed, always one of a fixed ordered set of options.
#[derive(Debug, Clone)]
pub struct RateSelector {
    options: Vec<f64>,
    current: f64,
}

impl RateSelector {
    pub fn new(options: Vec<f64>, initial: f64) -> OverlayResult<Self> {
        if options.is_empty() {
            return Err(OverlayError::EmptyRateOptions);
        }
        let current = options
            .iter()
            .copied()
            .find(|option| same_rate(*option, initial))
            .ok_or(OverlayError::InvalidRate(initial))?;
        Ok(Self { options, current })
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn options(&self) -> &[f64] {
        &self.options
    }

    pub fn is_current_rate(&self, rate: f64) -> bool {
        same_rate(rate, self.current)
    }

    pub fn current_label(&self) -> String {
        rate_label(self.current)
    }

    /// Switch to `rate`. Rates outside the option set are rejected and leave
    /// the selection untouched. Returns the stored option value.
    pub fn select(&mut self, rate: f64) -> OverlayResult<f64> {
        let Some(option) = self.options.iter().copied().find(|o| same_rate(*o, rate)) else {
            warn!("Rejected playback rate {} (not an option)", rate);
            return Err(OverlayError::InvalidRate(rate));
        };
        if option != self.current {
            debug!("Playback rate {} -> {}", rate_label(self.current), rate_label(option));
        }
        self.current = option;
        Ok(option)
    }

    /// Advance to the next option, wrapping from the fastest back to the
    /// slowest.
    pub fn cycle(&mut self) -> f64 {
        let index = self
            .options
            .iter()
            .position(|option| same_rate(*option, self.current))
            .unwrap_or(0);
        let next = self.options[(index + 1) % self.options.len()];
        debug!("Playback rate cycled to {}", rate_label(next));
        self.current = next;
        next
    }
}
