use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, trace};

use super::scrub::StepDirection;

/// Controls in the primary row, in declared left-to-right order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlId {
    SkipBackward,
    PlayPause,
    SkipForward,
    Bookmark,
    Speed,
    Captions,
    Scrubber,
}

impl ControlId {
    pub const ALL: [ControlId; 7] = [
        ControlId::SkipBackward,
        ControlId::PlayPause,
        ControlId::SkipForward,
        ControlId::Bookmark,
        ControlId::Speed,
        ControlId::Captions,
        ControlId::Scrubber,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusTarget {
    Header,
    Control(ControlId),
    Subtitles,
}

impl FocusTarget {
    pub const DEFAULT: FocusTarget = FocusTarget::Control(ControlId::PlayPause);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

use ControlId::*;
use Direction::*;
use FocusTarget::{Control, Header, Subtitles};

/// Static focus topology: `(from, direction) -> to`.
///
/// Pairs missing from the table are edges and leave focus where it is.
/// Left/Right on the scrubber never reach this table; they become scrub steps.
pub const ADJACENCY: &[(FocusTarget, Direction, FocusTarget)] = &[
    (Header, Down, Control(PlayPause)),
    (Subtitles, Up, Control(PlayPause)),
    // Every primary control reaches the header and the subtitle section
    (Control(SkipBackward), Up, Header),
    (Control(PlayPause), Up, Header),
    (Control(SkipForward), Up, Header),
    (Control(Bookmark), Up, Header),
    (Control(Speed), Up, Header),
    (Control(Captions), Up, Header),
    (Control(Scrubber), Up, Header),
    (Control(SkipBackward), Down, Subtitles),
    (Control(PlayPause), Down, Subtitles),
    (Control(SkipForward), Down, Subtitles),
    (Control(Bookmark), Down, Subtitles),
    (Control(Speed), Down, Subtitles),
    (Control(Captions), Down, Subtitles),
    (Control(Scrubber), Down, Subtitles),
    // Sibling order, no wraparound
    (Control(SkipBackward), Right, Control(PlayPause)),
    (Control(PlayPause), Right, Control(SkipForward)),
    (Control(SkipForward), Right, Control(Bookmark)),
    (Control(Bookmark), Right, Control(Speed)),
    (Control(Speed), Right, Control(Captions)),
    (Control(Captions), Right, Control(Scrubber)),
    (Control(PlayPause), Left, Control(SkipBackward)),
    (Control(SkipForward), Left, Control(PlayPause)),
    (Control(Bookmark), Left, Control(SkipForward)),
    (Control(Speed), Left, Control(Bookmark)),
    (Control(Captions), Left, Control(Speed)),
    (Control(Scrubber), Left, Control(Captions)),
];

/// Raw table lookup, ignoring focusability.
pub fn neighbor(from: FocusTarget, direction: Direction) -> Option<FocusTarget> {
    ADJACENCY
        .iter()
        .find(|(source, dir, _)| *source == from && *dir == direction)
        .map(|(_, _, to)| *to)
}

/// Outcome of routing one directional press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Moved { from: FocusTarget, to: FocusTarget },
    /// Left/Right while the scrubber holds focus
    Scrub(StepDirection),
    /// Edge of the topology, or every candidate is disabled
    Blocked,
    /// Nothing focused, or a modal owns directional input
    Ignored,
}

/// Directional focus cursor over the fixed overlay topology.
#[derive(Debug, Default)]
pub struct FocusNavigator {
    current: Option<FocusTarget>,
    last: Option<FocusTarget>,
    disabled: HashSet<FocusTarget>,
    modal_open: bool,
}

impl FocusNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<FocusTarget> {
        self.current
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    /// A modal (subtitle settings) takes over directional input.
    pub fn set_modal(&mut self, open: bool) {
        self.modal_open = open;
    }

    /// Play/pause is the fallback target and can never be disabled.
    pub fn is_focusable(&self, target: FocusTarget) -> bool {
        target == FocusTarget::DEFAULT || !self.disabled.contains(&target)
    }

    pub fn set_focusable(&mut self, target: FocusTarget, focusable: bool) {
        if focusable || target == FocusTarget::DEFAULT {
            self.disabled.remove(&target);
            return;
        }
        self.disabled.insert(target);

        if self.current == Some(target) {
            debug!("Focused {:?} became unfocusable, falling back", target);
            self.current = Some(FocusTarget::DEFAULT);
        }
        if self.last == Some(target) {
            self.last = None;
        }
    }

    /// Overlay hidden: drop focus but remember where it was.
    pub fn suspend(&mut self) {
        if let Some(current) = self.current.take() {
            self.last = Some(current);
        }
    }

    /// Overlay shown: restore the remembered target, or play/pause.
    pub fn restore(&mut self) -> FocusTarget {
        let target = self
            .current
            .or(self.last)
            .filter(|target| self.is_focusable(*target))
            .unwrap_or(FocusTarget::DEFAULT);
        self.current = Some(target);
        target
    }

    /// Focus a specific target directly (pointer click on a TV overlay).
    pub fn focus(&mut self, target: FocusTarget) -> bool {
        if !self.is_focusable(target) {
            return false;
        }
        self.current = Some(target);
        true
    }

    /// Next focusable target from `from` in `direction`.
    ///
    /// Horizontal moves skip over disabled siblings; vertical moves into a
    /// disabled section are blocked.
    pub fn next_target(&self, from: FocusTarget, direction: Direction) -> Option<FocusTarget> {
        let mut candidate = neighbor(from, direction)?;
        loop {
            if self.is_focusable(candidate) {
                return Some(candidate);
            }
            if !direction.is_horizontal() {
                return None;
            }
            candidate = neighbor(candidate, direction)?;
        }
    }

    pub fn navigate(&mut self, direction: Direction) -> Route {
        if self.modal_open {
            trace!("Modal open, directional input not routed to controls");
            return Route::Ignored;
        }
        let Some(from) = self.current else {
            return Route::Ignored;
        };

        if from == Control(Scrubber) && direction.is_horizontal() {
            let step = if direction == Left {
                StepDirection::Backward
            } else {
                StepDirection::Forward
            };
            return Route::Scrub(step);
        }

        match self.next_target(from, direction) {
            Some(to) => {
                debug!("Focus {:?} -> {:?}", from, to);
                self.current = Some(to);
                Route::Moved { from, to }
            }
            None => Route::Blocked,
        }
    }
}
