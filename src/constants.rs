// Timing and layout constants for the overlay state machines.
// Defaults here seed `OverlayConfig`; tune them there rather than in code.

// === Scrubbing ===
/// Quiet window after the last directional step before the seek is committed.
pub const SCRUB_DEBOUNCE_MS: u64 = 600;
/// Directional steps move `duration / SCRUB_STEP_DIVISOR` seconds.
pub const SCRUB_STEP_DIVISOR: f64 = 300.0;
/// Lower bound for a single directional step, in seconds.
pub const SCRUB_MIN_STEP_SECS: f64 = 1.0;

// === Visibility ===
pub const IDLE_TIMEOUT_MS: u64 = 4000;

// === Playback ===
pub const SKIP_INTERVAL_SECS: f64 = 10.0;
pub const RATE_OPTIONS: [f64; 6] = [0.5, 0.75, 1.0, 1.25, 1.5, 2.0];
pub const DEFAULT_RATE: f64 = 1.0;
/// Tolerance when comparing rates, so 1.001 still highlights the 100% entry.
pub const RATE_EPSILON: f64 = 0.01;
