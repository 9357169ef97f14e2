pub mod errors;
pub mod format;

pub use errors::{OverlayError, OverlayResult};
pub use format::{format_duration, format_seconds};
