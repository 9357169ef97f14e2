pub mod bookmarks;
pub mod controller;
pub mod focus;
pub mod input;
pub mod rate;
pub mod runtime;
pub mod scrub;
pub mod subtitles;
pub mod timer;
pub mod visibility;

pub use bookmarks::{Bookmark, BookmarkRegistry};
pub use controller::{OverlayController, OverlaySnapshot};
pub use focus::{ControlId, Direction, FocusNavigator, FocusTarget, Route};
pub use input::{InputMode, OverlayEvent, OverlayInput};
pub use rate::{RateSelector, rate_label};
pub use runtime::{OverlayHandle, OverlayRuntime};
pub use scrub::{ScrubController, ScrubOrigin, ScrubSession, StepDirection};
pub use subtitles::{CueStatus, SubtitleSelector, SubtitleTrack};
pub use timer::{TimerScheduler, TimerSlot};
pub use visibility::{Visibility, VisibilityCoordinator};
