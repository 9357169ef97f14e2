use playback_overlay::OverlayConfig;
use playback_overlay::models::ClockTick;
use playback_overlay::overlay::{
    ControlId, Direction, FocusTarget, InputMode, OverlayInput, Visibility,
};
use playback_overlay::platforms::RemoteCommand;
use std::time::Duration;
use tokio::time::sleep;

use crate::common::{ClockCall, RecordingClock, TestOverlay};

const IDLE: Duration = Duration::from_millis(4000);
const JUST_AFTER: Duration = Duration::from_millis(1);

fn overlay(mode: InputMode, playing: bool) -> TestOverlay {
    TestOverlay::new(mode, RecordingClock::new(0.0, 600.0, playing))
}

#[tokio::test(start_paused = true)]
async fn test_idle_hides_while_playing() {
    let mut test = overlay(InputMode::DirectionalPad, true);

    sleep(IDLE - Duration::from_millis(10)).await;
    test.fire_timers();
    assert!(test.overlay.is_visible());

    sleep(Duration::from_millis(10) + JUST_AFTER).await;
    test.fire_timers();
    assert_eq!(test.overlay.snapshot().visibility, Visibility::Hidden);
    assert_eq!(test.overlay.focus(), None);
}

#[tokio::test(start_paused = true)]
async fn test_interaction_postpones_hide() {
    let mut test = overlay(InputMode::Touch, true);

    sleep(Duration::from_millis(3000)).await;
    test.dispatch(OverlayInput::Tap);

    sleep(Duration::from_millis(3000)).await;
    test.fire_timers();
    assert!(test.overlay.is_visible());

    sleep(Duration::from_millis(1000) + JUST_AFTER).await;
    test.fire_timers();
    assert!(!test.overlay.is_visible());
}

#[tokio::test(start_paused = true)]
async fn test_paused_playback_keeps_controls_up() {
    let mut test = overlay(InputMode::DirectionalPad, false);

    sleep(IDLE * 3).await;
    test.fire_timers();
    assert!(test.overlay.is_visible());

    // Engine reports playback started
    test.dispatch(OverlayInput::ClockTick(ClockTick::new(1.0, 600.0, true)));
    sleep(IDLE + JUST_AFTER).await;
    test.fire_timers();
    assert!(!test.overlay.is_visible());
}

#[tokio::test(start_paused = true)]
async fn test_open_panel_blocks_idle_hide() {
    let mut test = overlay(InputMode::DirectionalPad, true);
    test.press(Direction::Down, 1);
    test.dispatch(OverlayInput::Select);

    sleep(IDLE * 2).await;
    test.fire_timers();
    assert!(test.overlay.is_visible());
    assert!(test.overlay.subtitles().is_panel_open());

    test.dispatch(OverlayInput::Back);
    sleep(IDLE + JUST_AFTER).await;
    test.fire_timers();
    assert!(!test.overlay.is_visible());
}

#[tokio::test(start_paused = true)]
async fn test_active_drag_blocks_idle_hide() {
    let mut test = overlay(InputMode::Touch, true);
    test.dispatch(OverlayInput::GestureStart);

    sleep(IDLE * 2).await;
    test.fire_timers();
    assert!(test.overlay.is_visible());
    assert!(test.overlay.scrub_session().is_some());
}

#[tokio::test(start_paused = true)]
async fn test_revealing_input_is_consumed() {
    let mut test = overlay(InputMode::DirectionalPad, true);
    test.dispatch(OverlayInput::SetVisible(false));

    test.dispatch(OverlayInput::Select);
    assert!(test.overlay.is_visible());
    assert_eq!(test.overlay.focus(), Some(FocusTarget::DEFAULT));
    assert!(test.clock.calls().is_empty());

    test.dispatch(OverlayInput::Select);
    assert_eq!(test.clock.calls(), vec![ClockCall::Pause]);
}

#[tokio::test(start_paused = true)]
async fn test_hidden_touch_controls_ignore_taps() {
    let mut test = overlay(InputMode::Touch, true);
    test.dispatch(OverlayInput::ToggleVisibility);
    assert!(!test.overlay.is_visible());

    test.dispatch(OverlayInput::Activate(ControlId::SkipForward));
    assert!(test.overlay.is_visible());
    assert!(test.clock.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_remote_commands_do_not_reveal() {
    let mut test = overlay(InputMode::DirectionalPad, true);
    test.dispatch(OverlayInput::SetVisible(false));

    test.dispatch(OverlayInput::Remote(RemoteCommand::TogglePlayPause));
    test.dispatch(OverlayInput::Remote(RemoteCommand::Seek(-20.0)));
    test.dispatch(OverlayInput::Remote(RemoteCommand::Skip(30.0)));

    assert!(!test.overlay.is_visible());
    assert_eq!(
        test.clock.calls(),
        vec![
            ClockCall::Pause,
            ClockCall::Seek(0.0),
            ClockCall::Skip(30.0)
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_hidden_keeps_rate_and_bookmarks() {
    let mut test = overlay(InputMode::Touch, true);
    test.dispatch(OverlayInput::SelectRate(1.5));
    test.dispatch(OverlayInput::AddBookmark);

    test.dispatch(OverlayInput::SetVisible(false));
    let snapshot = test.overlay.snapshot();
    assert_eq!(snapshot.rate, 1.5);
    assert_eq!(snapshot.bookmarks.map(|list| list.len()), Some(1));
}

#[tokio::test(start_paused = true)]
async fn test_starts_hidden_when_configured() {
    let mut config = OverlayConfig::default();
    config.visibility.start_visible = false;
    let mut test = TestOverlay::with_config(&config, RecordingClock::new(0.0, 60.0, true));
    assert!(!test.overlay.is_visible());
    assert_eq!(test.overlay.focus(), None);

    sleep(IDLE * 2).await;
    assert!(test.fire_timers().is_empty());
    assert!(!test.overlay.is_visible());
}

#[tokio::test(start_paused = true)]
async fn test_toggle_suspends_and_restores_focus() {
    let mut test = overlay(InputMode::DirectionalPad, true);
    test.press(Direction::Right, 2);

    test.dispatch(OverlayInput::ToggleVisibility);
    assert!(!test.overlay.is_visible());
    assert_eq!(test.overlay.focus(), None);

    test.dispatch(OverlayInput::ToggleVisibility);
    assert!(test.overlay.is_visible());
    assert_eq!(
        test.overlay.focus(),
        Some(FocusTarget::Control(ControlId::Bookmark))
    );
}
