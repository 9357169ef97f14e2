use serde::Serialize;
use tracing::{debug, info, trace, warn};

use super::bookmarks::{Bookmark, BookmarkRegistry};
use super::focus::{ControlId, Direction, FocusNavigator, FocusTarget, Route};
use super::input::{InputMode, OverlayEvent, OverlayInput};
use super::rate::RateSelector;
use super::scrub::{ScrubController, ScrubOrigin, ScrubSession};
use super::subtitles::{CueStatus, SubtitleSelector, SubtitleTrack};
use super::timer::TimerScheduler;
use super::visibility::{Visibility, VisibilityCoordinator};
use crate::config::OverlayConfig;
use crate::models::{BookmarkId, ClockTick, PlaybackPosition, SegmentId, TrackId};
use crate::platforms::{NowPlayingBridge, NowPlayingMetadata, PlaybackStatus, RemoteCommand};
use crate::player::PlaybackClock;
use crate::utils::{OverlayResult, format_seconds};

const SCRUBBER: FocusTarget = FocusTarget::Control(ControlId::Scrubber);

/// Everything a render layer needs to draw the overlay, published after
/// every dispatched input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlaySnapshot {
    pub input_mode: InputMode,
    pub visibility: Visibility,
    pub focus: Option<FocusTarget>,
    pub disabled_controls: Vec<ControlId>,

    pub is_playing: bool,
    pub current_time: f64,
    pub duration: f64,
    /// Pending scrub value while scrubbing, else the clock time
    pub progress: f64,
    pub progress_fraction: f64,
    pub elapsed_label: String,
    pub duration_label: String,
    pub scrub: Option<ScrubSession>,

    pub rate: f64,
    pub rate_label: String,
    pub rate_options: Vec<f64>,

    /// `None` when bookmarks are disabled
    pub bookmarks: Option<Vec<Bookmark>>,

    pub subtitle_tracks: Vec<SubtitleTrack>,
    pub selected_track: Option<TrackId>,
    pub cue_text: Option<String>,
    pub cue_status: CueStatus,
    pub settings_open: bool,
    pub settings_highlight: Option<usize>,

    pub title: Option<String>,
}

/// The overlay state machine.
///
/// Owns every sub-controller and the playback clock. All mutation goes
/// through [`OverlayController::dispatch`] or the public action methods,
/// which must run on a single task inside a tokio runtime (timers are
/// spawned tasks that feed [`OverlayInput`]s back through the scheduler).
pub struct OverlayController {
    mode: InputMode,
    clock: Box<dyn PlaybackClock>,
    now_playing: Option<Box<dyn NowPlayingBridge>>,
    metadata: Option<NowPlayingMetadata>,

    scrub: ScrubController,
    focus: FocusNavigator,
    visibility: VisibilityCoordinator,
    bookmarks: Option<BookmarkRegistry>,
    rates: RateSelector,
    subtitles: SubtitleSelector,

    skip_interval: f64,
    events: Vec<OverlayEvent>,
}

impl OverlayController {
    pub fn new(
        config: &OverlayConfig,
        clock: Box<dyn PlaybackClock>,
        scheduler: TimerScheduler,
    ) -> OverlayResult<Self> {
        config.validate()?;
        let rates = RateSelector::new(
            config.playback.rate_options.clone(),
            config.playback.default_rate,
        )?;

        let mut controller = Self {
            mode: config.input_mode,
            clock,
            now_playing: None,
            metadata: None,
            scrub: ScrubController::new(&config.scrub, scheduler.clone()),
            focus: FocusNavigator::new(),
            visibility: VisibilityCoordinator::new(config.idle_timeout(), scheduler),
            bookmarks: config.bookmarks.enabled.then(BookmarkRegistry::new),
            rates,
            subtitles: SubtitleSelector::new(),
            skip_interval: config.playback.skip_interval_secs,
            events: Vec::new(),
        };
        controller.refresh_focusable();

        if config.visibility.start_visible {
            controller.visibility.set_visible(true);
            controller.on_shown();
        }

        info!(
            "Overlay controller ready ({:?}, rate {})",
            controller.mode,
            controller.rates.current_label()
        );
        Ok(controller)
    }

    /// Attach the OS media-session bridge.
    pub fn with_now_playing(mut self, bridge: Box<dyn NowPlayingBridge>) -> Self {
        self.now_playing = Some(bridge);
        self
    }

    /// Process one input and return the notifications it produced.
    pub fn dispatch(&mut self, input: OverlayInput) -> Vec<OverlayEvent> {
        trace!("Dispatching {:?}", input);

        if input.is_interaction() && self.visibility.register_interaction() {
            self.on_shown();
            if targets_surface(&input) {
                // Controls were not hit-testable, so the input only reveals them
                debug!("Input revealed the controls and was consumed");
                return std::mem::take(&mut self.events);
            }
        }

        match input {
            OverlayInput::Tap => {}
            OverlayInput::Activate(control) => self.activate_pointer(control),
            OverlayInput::GestureStart => self.begin_gesture(),
            OverlayInput::GestureMove { translation, width } => {
                self.update_gesture(translation / width.max(1.0))
            }
            OverlayInput::GestureEnd => self.end_gesture(),

            OverlayInput::Press(direction) => self.press(direction),
            OverlayInput::Select => self.select(),
            OverlayInput::Back => self.back(),

            OverlayInput::ToggleVisibility => match self.visibility.toggle() {
                Visibility::Visible => self.on_shown(),
                Visibility::Hidden => self.on_hidden(),
            },
            OverlayInput::SetVisible(visible) => self.set_visible(visible),

            OverlayInput::SelectRate(rate) => {
                if let Err(e) = self.select_rate(rate) {
                    debug!("Rate selection ignored: {}", e);
                }
            }
            OverlayInput::AddBookmark => {
                self.add_bookmark();
            }
            OverlayInput::JumpToBookmark(id) => {
                self.jump_to_bookmark(&id);
            }
            OverlayInput::RemoveBookmark(id) => {
                self.remove_bookmark(&id);
            }
            OverlayInput::SelectSubtitleTrack(id) => {
                if let Err(e) = self.select_subtitle_track(id) {
                    debug!("Subtitle selection ignored: {}", e);
                }
            }
            OverlayInput::OpenSubtitleSettings => self.open_subtitle_settings(),
            OverlayInput::CloseSubtitleSettings => self.close_subtitle_settings(),
            OverlayInput::SelectSegment(id) => self.select_segment(id),

            OverlayInput::ClockTick(tick) => self.observe_tick(tick),
            OverlayInput::Remote(command) => self.handle_remote(command),
            OverlayInput::SetSubtitleTracks(tracks) => {
                self.subtitles.set_tracks(tracks);
                self.refresh_focusable();
            }
            OverlayInput::SetCueText(text) => self.subtitles.set_cue_text(text),
            OverlayInput::SetCueStatus(status) => self.subtitles.set_status(status),
            OverlayInput::SetMetadata(metadata) => self.set_metadata(metadata),

            OverlayInput::ScrubCommitDue { ticket } => {
                if let Some(value) = self.scrub.commit_due(ticket) {
                    self.commit_seek(value);
                }
            }
            OverlayInput::IdleTimeout { ticket } => self.idle_expired(ticket),
        }

        self.settle_scrub();
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> OverlaySnapshot {
        let position = self.clock.position();
        let progress = self.scrub.progress(position);

        OverlaySnapshot {
            input_mode: self.mode,
            visibility: self.visibility.state(),
            focus: self.focus.current(),
            disabled_controls: ControlId::ALL
                .into_iter()
                .filter(|control| !self.focus.is_focusable(FocusTarget::Control(*control)))
                .collect(),
            is_playing: self.clock.is_playing(),
            current_time: position.current_time,
            duration: position.duration,
            progress,
            progress_fraction: position.fraction_of(progress),
            elapsed_label: format_seconds(progress),
            duration_label: format_seconds(position.duration),
            scrub: self.scrub.session().copied(),
            rate: self.rates.current(),
            rate_label: self.rates.current_label(),
            rate_options: self.rates.options().to_vec(),
            bookmarks: self.bookmarks.as_ref().map(|registry| registry.list().to_vec()),
            subtitle_tracks: self.subtitles.tracks().to_vec(),
            selected_track: self.subtitles.selected().cloned(),
            cue_text: self.subtitles.cue_text().map(str::to_string),
            cue_status: self.subtitles.status().clone(),
            settings_open: self.subtitles.is_panel_open(),
            settings_highlight: self.subtitles.panel_highlight(),
            title: self.metadata.as_ref().map(|metadata| metadata.title.clone()),
        }
    }

    pub fn input_mode(&self) -> InputMode {
        self.mode
    }

    pub fn position(&self) -> PlaybackPosition {
        self.clock.position()
    }

    pub fn is_visible(&self) -> bool {
        self.visibility.is_visible()
    }

    pub fn focus(&self) -> Option<FocusTarget> {
        self.focus.current()
    }

    pub fn scrub_session(&self) -> Option<&ScrubSession> {
        self.scrub.session()
    }

    pub fn progress(&self) -> f64 {
        self.scrub.progress(self.clock.position())
    }

    pub fn rate(&self) -> f64 {
        self.rates.current()
    }

    pub fn is_current_rate(&self, rate: f64) -> bool {
        self.rates.is_current_rate(rate)
    }

    pub fn bookmarks(&self) -> Option<&[Bookmark]> {
        self.bookmarks.as_ref().map(|registry| registry.list())
    }

    pub fn subtitles(&self) -> &SubtitleSelector {
        &self.subtitles
    }

    /// Switch playback speed. Non-options are rejected and nothing changes.
    pub fn select_rate(&mut self, rate: f64) -> OverlayResult<f64> {
        let rate = self.rates.select(rate)?;
        self.clock.set_rate(rate);
        Ok(rate)
    }

    /// Bookmark the current clock time. `None` when bookmarks are disabled.
    pub fn add_bookmark(&mut self) -> Option<Bookmark> {
        let time = self.clock.current_time();
        let bookmark = self.bookmarks.as_mut()?.add(time);
        self.events.push(OverlayEvent::BookmarkAdded(bookmark.clone()));
        Some(bookmark)
    }

    /// Seek to a bookmark's stored time. False for unknown ids.
    pub fn jump_to_bookmark(&mut self, id: &BookmarkId) -> bool {
        let Some(time) = self
            .bookmarks
            .as_ref()
            .and_then(|registry| registry.jump_target(id))
        else {
            debug!("Ignoring jump to unknown bookmark {}", id);
            return false;
        };
        self.drop_scrub("Bookmark jump");
        debug!("Jumping to bookmark {} at {:.3}s", id, time);
        self.clock.seek(time);
        self.publish_status();
        true
    }

    /// False for unknown ids, leaving the registry untouched.
    pub fn remove_bookmark(&mut self, id: &BookmarkId) -> bool {
        let removed = self
            .bookmarks
            .as_mut()
            .is_some_and(|registry| registry.remove(id));
        if removed {
            self.events.push(OverlayEvent::BookmarkRemoved(id.clone()));
        }
        removed
    }

    pub fn select_subtitle_track(&mut self, id: Option<TrackId>) -> OverlayResult<()> {
        self.subtitles.select_track(id)
    }

    pub fn open_subtitle_settings(&mut self) {
        self.subtitles.open_panel();
        self.focus.set_modal(true);
    }

    pub fn close_subtitle_settings(&mut self) {
        self.subtitles.close_panel();
        self.focus.set_modal(false);
    }

    pub fn select_segment(&mut self, id: SegmentId) {
        info!("Segment {} selected", id);
        self.close_subtitle_settings();
        self.events.push(OverlayEvent::SegmentSelected(id));
    }

    pub fn set_visible(&mut self, visible: bool) {
        if !self.visibility.set_visible(visible) {
            return;
        }
        if visible {
            self.on_shown();
        } else {
            self.on_hidden();
        }
    }

    fn activate_pointer(&mut self, control: ControlId) {
        let target = FocusTarget::Control(control);
        if !self.focus.is_focusable(target) {
            debug!("Ignoring activation of disabled control {:?}", control);
            return;
        }
        if self.mode == InputMode::DirectionalPad {
            self.focus.focus(target);
        }
        self.activate(control);
    }

    fn activate(&mut self, control: ControlId) {
        debug!("Activating {:?}", control);
        match control {
            ControlId::SkipBackward => self.skip(-self.skip_interval),
            ControlId::PlayPause => self.toggle_play_pause(),
            ControlId::SkipForward => self.skip(self.skip_interval),
            ControlId::Bookmark => {
                self.add_bookmark();
            }
            ControlId::Speed => {
                let rate = self.rates.cycle();
                self.clock.set_rate(rate);
            }
            ControlId::Captions => {
                self.subtitles.toggle_captions();
            }
            ControlId::Scrubber => {
                if self.mode != InputMode::DirectionalPad {
                    return;
                }
                if self.scrub.is_editing() {
                    if let Some(value) = self.scrub.commit_now() {
                        self.commit_seek(value);
                    }
                } else {
                    self.scrub.begin_editing(self.clock.position());
                }
            }
        }
    }

    fn begin_gesture(&mut self) {
        if let Some(flushed) = self.scrub.begin_gesture(self.clock.position()) {
            self.commit_seek(flushed);
        }
    }

    fn update_gesture(&mut self, normalized_delta: f64) {
        self.scrub.update_gesture(normalized_delta, self.clock.position());
    }

    fn end_gesture(&mut self) {
        if let Some(value) = self.scrub.end_gesture() {
            self.commit_seek(value);
        }
    }

    fn press(&mut self, direction: Direction) {
        if self.mode != InputMode::DirectionalPad {
            return;
        }
        if self.subtitles.is_panel_open() {
            match direction {
                Direction::Up => self.subtitles.move_highlight(-1),
                Direction::Down => self.subtitles.move_highlight(1),
                Direction::Left | Direction::Right => {}
            }
            return;
        }
        match self.focus.navigate(direction) {
            Route::Scrub(step) => {
                self.scrub.step(step, self.clock.position());
            }
            Route::Moved { .. } | Route::Blocked | Route::Ignored => {}
        }
    }

    fn select(&mut self) {
        if self.mode != InputMode::DirectionalPad {
            return;
        }
        if self.subtitles.is_panel_open() {
            if let Err(e) = self.subtitles.apply_highlight() {
                warn!("Failed to apply subtitle option: {}", e);
            }
            self.focus.set_modal(false);
            return;
        }
        match self.focus.current() {
            Some(FocusTarget::Header) => self.events.push(OverlayEvent::CloseRequested),
            Some(FocusTarget::Subtitles) => self.open_subtitle_settings(),
            Some(FocusTarget::Control(control)) => self.activate(control),
            None => {}
        }
    }

    fn back(&mut self) {
        if self.subtitles.is_panel_open() {
            self.close_subtitle_settings();
        } else if self.scrub.is_active() {
            if let Some(value) = self.scrub.commit_now() {
                self.commit_seek(value);
            }
        } else {
            self.set_visible(false);
        }
    }

    fn handle_remote(&mut self, command: RemoteCommand) {
        debug!("Remote command {:?}", command);
        match command {
            RemoteCommand::Play => self.play(),
            RemoteCommand::Pause => self.pause(),
            RemoteCommand::TogglePlayPause => self.toggle_play_pause(),
            RemoteCommand::Seek(time) => {
                self.drop_scrub("Remote seek");
                let target = self.clock.position().clamp(time);
                self.commit_seek(target);
            }
            RemoteCommand::Skip(delta) => self.skip(delta),
        }
    }

    fn play(&mut self) {
        let was_playing = self.clock.is_playing();
        self.clock.play();
        self.after_clock_change(was_playing);
    }

    fn pause(&mut self) {
        let was_playing = self.clock.is_playing();
        self.clock.pause();
        self.after_clock_change(was_playing);
    }

    fn toggle_play_pause(&mut self) {
        if self.clock.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    fn skip(&mut self, delta: f64) {
        self.drop_scrub("Skip");
        let was_playing = self.clock.is_playing();
        self.clock.skip(delta);
        self.after_clock_change(was_playing);
    }

    /// A newer transport seek wins over a scrub that has not committed yet.
    fn drop_scrub(&mut self, cause: &str) {
        if let Some(pending) = self.scrub.commit_now() {
            debug!("{} supersedes pending scrub to {:.2}s", cause, pending);
        }
    }

    fn commit_seek(&mut self, value: f64) {
        debug!("Seeking to {:.2}s", value);
        self.clock.seek(value);
        self.publish_status();
    }

    fn observe_tick(&mut self, tick: ClockTick) {
        let was_playing = self.clock.is_playing();
        self.clock.observe(tick);
        self.after_clock_change(was_playing);
    }

    fn after_clock_change(&mut self, was_playing: bool) {
        self.publish_status();
        if !was_playing && self.clock.is_playing() {
            self.visibility.ensure_armed();
        }
    }

    fn idle_expired(&mut self, ticket: u64) {
        let can_hide = self.clock.is_playing()
            && !self.scrub.is_active()
            && !self.subtitles.is_panel_open();
        if self.visibility.idle_expired(ticket, can_hide) {
            self.on_hidden();
        }
    }

    fn set_metadata(&mut self, metadata: NowPlayingMetadata) {
        debug!("Now playing: {}", metadata.title);
        if let Some(bridge) = self.now_playing.as_mut() {
            bridge.publish_metadata(&metadata);
        }
        self.metadata = Some(metadata);
    }

    fn publish_status(&mut self) {
        let position = self.clock.position();
        let status = PlaybackStatus {
            is_playing: self.clock.is_playing(),
            position: position.current_time,
            duration: position.duration,
        };
        if let Some(bridge) = self.now_playing.as_mut() {
            bridge.publish_status(&status);
        }
    }

    fn on_shown(&mut self) {
        if self.mode == InputMode::DirectionalPad {
            let target = self.focus.restore();
            debug!("Focus restored to {:?}", target);
        }
    }

    fn on_hidden(&mut self) {
        self.focus.suspend();
        self.close_subtitle_settings();
    }

    fn refresh_focusable(&mut self) {
        self.focus.set_focusable(
            FocusTarget::Control(ControlId::Bookmark),
            self.bookmarks.is_some(),
        );
        self.focus.set_focusable(
            FocusTarget::Control(ControlId::Captions),
            self.subtitles.has_tracks(),
        );
    }

    /// Commit a scrub session whose context is gone: the overlay was hidden,
    /// or a directional session lost focus to another target or a modal.
    fn settle_scrub(&mut self) {
        let Some(session) = self.scrub.session() else {
            return;
        };
        let context_lost = !self.visibility.is_visible()
            || (session.origin == ScrubOrigin::Step
                && (self.focus.current() != Some(SCRUBBER) || self.focus.is_modal_open()));
        if context_lost && let Some(value) = self.scrub.commit_now() {
            debug!("Scrub context ended, committing immediately");
            self.commit_seek(value);
        }
    }
}

/// Inputs aimed at on-screen controls, which a hidden overlay swallows.
fn targets_surface(input: &OverlayInput) -> bool {
    matches!(
        input,
        OverlayInput::Tap
            | OverlayInput::Activate(_)
            | OverlayInput::GestureStart
            | OverlayInput::GestureMove { .. }
            | OverlayInput::GestureEnd
            | OverlayInput::Press(_)
            | OverlayInput::Select
            | OverlayInput::Back
    )
}
