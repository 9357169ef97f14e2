mod identifiers;
mod playback;

pub use identifiers::{BookmarkId, SegmentId, TrackId};
pub use playback::{ClockTick, PlaybackPosition};
