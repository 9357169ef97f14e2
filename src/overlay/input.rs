use serde::{Deserialize, Serialize};

use super::bookmarks::Bookmark;
use super::focus::{ControlId, Direction};
use super::subtitles::{CueStatus, SubtitleTrack};
use crate::models::{BookmarkId, ClockTick, SegmentId, TrackId};
use crate::platforms::{NowPlayingMetadata, RemoteCommand};

/// Input model selected when the overlay is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// Continuous pointer/touch gestures, no focus cursor
    Touch,
    /// Remote-control arrows plus an on-screen focus cursor
    #[default]
    DirectionalPad,
}

/// Everything the overlay event loop consumes.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayInput {
    // Pointer / touch
    /// Tap on the video surface
    Tap,
    /// Tap (or click) on a specific control
    Activate(ControlId),
    GestureStart,
    /// Cumulative horizontal drag since the gesture started
    GestureMove { translation: f64, width: f64 },
    GestureEnd,

    // Directional pad
    Press(Direction),
    Select,
    Back,

    // Explicit visibility control
    ToggleVisibility,
    SetVisible(bool),

    // Menu selections
    SelectRate(f64),
    AddBookmark,
    JumpToBookmark(BookmarkId),
    RemoveBookmark(BookmarkId),
    SelectSubtitleTrack(Option<TrackId>),
    OpenSubtitleSettings,
    CloseSubtitleSettings,
    SelectSegment(SegmentId),

    // Collaborator pushes
    ClockTick(ClockTick),
    Remote(RemoteCommand),
    SetSubtitleTracks(Vec<SubtitleTrack>),
    SetCueText(Option<String>),
    SetCueStatus(CueStatus),
    SetMetadata(NowPlayingMetadata),

    // Timer fires, carrying the ticket they were armed with
    ScrubCommitDue { ticket: u64 },
    IdleTimeout { ticket: u64 },
}

impl OverlayInput {
    /// Whether this input counts as user activity for the idle timer.
    pub fn is_interaction(&self) -> bool {
        !matches!(
            self,
            OverlayInput::ToggleVisibility
                | OverlayInput::SetVisible(_)
                | OverlayInput::ClockTick(_)
                | OverlayInput::Remote(_)
                | OverlayInput::SetSubtitleTracks(_)
                | OverlayInput::SetCueText(_)
                | OverlayInput::SetCueStatus(_)
                | OverlayInput::SetMetadata(_)
                | OverlayInput::ScrubCommitDue { .. }
                | OverlayInput::IdleTimeout { .. }
        )
    }
}

/// Notifications for the host application.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEvent {
    /// Header (back) control activated
    CloseRequested,
    SegmentSelected(SegmentId),
    BookmarkAdded(Bookmark),
    BookmarkRemoved(BookmarkId),
}
