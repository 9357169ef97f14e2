use thiserror::Error;

/// Errors raised at the overlay's selection boundaries.
///
/// Out-of-range scrub input and stale bookmark references are not errors:
/// the former is clamped and the latter is reported as `false`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OverlayError {
    #[error("Invalid playback rate: {0}")]
    InvalidRate(f64),

    #[error("Unknown subtitle track: {0}")]
    InvalidTrack(String),

    #[error("Rate option list is empty")]
    EmptyRateOptions,

    #[error("Configuration error: {0}")]
    InvalidConfig(String),
}

pub type OverlayResult<T> = Result<T, OverlayError>;
