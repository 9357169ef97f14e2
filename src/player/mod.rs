pub mod controller;
pub mod traits;

pub use controller::{ClockCommand, ClockHandle};
pub use traits::PlaybackClock;
