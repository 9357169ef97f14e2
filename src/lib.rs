// Overlay state machines shared by the touch and remote-control frontends.
// The overlay-sim binary in src/main.rs drives them from stdin.

pub mod config;
pub mod constants;
pub mod core;
pub mod models;
pub mod overlay;
pub mod platforms;
pub mod player;
pub mod utils;

pub use config::OverlayConfig;
pub use overlay::{OverlayController, OverlayEvent, OverlayHandle, OverlayInput, OverlayRuntime};
pub use utils::{OverlayError, OverlayResult};
