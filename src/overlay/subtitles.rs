use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, warn};

use crate::models::TrackId;
use crate::utils::{OverlayError, OverlayResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleTrack {
    pub id: TrackId,
    pub label: String,
    pub format: String,
    /// Lower sorts first
    pub priority: i32,
}

impl SubtitleTrack {
    pub fn new(
        id: impl Into<TrackId>,
        label: impl Into<String>,
        format: impl Into<String>,
        priority: i32,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            format: format.into(),
            priority,
        }
    }
}

/// Display order: ascending priority, then case-insensitive label.
pub fn display_order(a: &SubtitleTrack, b: &SubtitleTrack) -> Ordering {
    a.priority
        .cmp(&b.priority)
        .then_with(|| a.label.to_lowercase().cmp(&b.label.to_lowercase()))
}

/// Load state reported by the cue provider, shown as-is.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CueStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Track list, caption selection and the subtitle settings panel.
///
/// Panel options are `[Off, tracks...]` in display order; index 0 is off.
#[derive(Debug, Default)]
pub struct SubtitleSelector {
    tracks: Vec<SubtitleTrack>,
    selected: Option<TrackId>,
    cue_text: Option<String>,
    status: CueStatus,
    panel_highlight: Option<usize>,
}

impl SubtitleSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracks(&self) -> &[SubtitleTrack] {
        &self.tracks
    }

    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    pub fn selected(&self) -> Option<&TrackId> {
        self.selected.as_ref()
    }

    pub fn cue_text(&self) -> Option<&str> {
        self.cue_text.as_deref()
    }

    pub fn status(&self) -> &CueStatus {
        &self.status
    }

    /// Replace the track list. A selection that disappeared turns captions
    /// off.
    pub fn set_tracks(&mut self, mut tracks: Vec<SubtitleTrack>) {
        tracks.sort_by(display_order);
        debug!("Subtitle tracks updated ({} available)", tracks.len());
        self.tracks = tracks;

        if let Some(selected) = &self.selected
            && !self.tracks.iter().any(|track| &track.id == selected)
        {
            debug!("Selected subtitle track {} no longer available", selected);
            self.selected = None;
            self.cue_text = None;
        }
        if let Some(highlight) = self.panel_highlight {
            self.panel_highlight = Some(highlight.min(self.tracks.len()));
        }
    }

    pub fn set_cue_text(&mut self, text: Option<String>) {
        self.cue_text = text;
    }

    pub fn set_status(&mut self, status: CueStatus) {
        if let CueStatus::Failed(reason) = &status {
            warn!("Subtitle cues failed to load: {}", reason);
        }
        self.status = status;
    }

    /// `None` turns captions off. Unknown ids are rejected without changing
    /// the current selection.
    pub fn select_track(&mut self, id: Option<TrackId>) -> OverlayResult<()> {
        if let Some(id) = &id
            && !self.tracks.iter().any(|track| &track.id == id)
        {
            warn!("Rejected unknown subtitle track {}", id);
            return Err(OverlayError::InvalidTrack(id.to_string()));
        }
        if self.selected != id {
            debug!("Subtitle track {:?} -> {:?}", self.selected, id);
            self.cue_text = None;
        }
        self.selected = id;
        Ok(())
    }

    /// Captions button: off -> first track, on -> off.
    pub fn toggle_captions(&mut self) -> Option<&TrackId> {
        if self.selected.is_some() {
            self.selected = None;
            self.cue_text = None;
            debug!("Captions turned off");
        } else if let Some(first) = self.tracks.first() {
            debug!("Captions turned on with {}", first.label);
            self.selected = Some(first.id.clone());
        }
        self.selected.as_ref()
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_highlight.is_some()
    }

    pub fn panel_highlight(&self) -> Option<usize> {
        self.panel_highlight
    }

    /// Open the settings panel with the current selection highlighted.
    pub fn open_panel(&mut self) {
        let highlight = self
            .selected
            .as_ref()
            .and_then(|id| self.tracks.iter().position(|track| &track.id == id))
            .map(|index| index + 1)
            .unwrap_or(0);
        debug!("Subtitle settings opened");
        self.panel_highlight = Some(highlight);
    }

    pub fn close_panel(&mut self) -> bool {
        let was_open = self.panel_highlight.take().is_some();
        if was_open {
            debug!("Subtitle settings closed");
        }
        was_open
    }

    /// Move the highlight by `delta` options, clamped to the list.
    pub fn move_highlight(&mut self, delta: isize) {
        let last = self.tracks.len();
        if let Some(highlight) = self.panel_highlight.as_mut() {
            *highlight = highlight.saturating_add_signed(delta).min(last);
        }
    }

    /// Apply the highlighted option and close the panel.
    pub fn apply_highlight(&mut self) -> OverlayResult<()> {
        let Some(highlight) = self.panel_highlight.take() else {
            return Ok(());
        };
        let id = highlight
            .checked_sub(1)
            .and_then(|index| self.tracks.get(index))
            .map(|track| track.id.clone());
        self.select_track(id)
    }
}
