use playback_overlay::{OverlayConfig, OverlayHandle};
use playback_overlay::overlay::{Direction, InputMode, OverlayEvent, OverlayInput, OverlayRuntime};
use playback_overlay::platforms::{MediaKind, NowPlayingMetadata, RemoteCommand};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout};

use crate::common::{RecordingBridge, RecordingClock};

fn config(mode: InputMode) -> OverlayConfig {
    OverlayConfig {
        input_mode: mode,
        ..Default::default()
    }
}

/// Inputs are handled in order, so once the bookmark event for a trailing
/// `AddBookmark` arrives everything sent before it has been applied.
async fn flush(
    handle: &OverlayHandle,
    events: &mut mpsc::UnboundedReceiver<OverlayEvent>,
) -> Vec<OverlayEvent> {
    assert!(handle.send(OverlayInput::AddBookmark));
    let mut seen = Vec::new();
    loop {
        let event = timeout(Duration::from_secs(1), events.recv())
            .await
            .expect("runtime should answer within a second")
            .expect("event channel open");
        let done = matches!(event, OverlayEvent::BookmarkAdded(_));
        seen.push(event);
        if done {
            return seen;
        }
    }
}

#[tokio::test]
async fn test_drag_through_runtime() {
    let clock = RecordingClock::new(10.0, 120.0, true);
    let (handle, runtime, mut events) =
        OverlayRuntime::new(&config(InputMode::Touch), Box::new(clock.clone())).unwrap();
    let task = runtime.spawn();

    handle.send(OverlayInput::GestureStart);
    handle.send(OverlayInput::GestureMove {
        translation: 150.0,
        width: 300.0,
    });
    handle.send(OverlayInput::GestureEnd);
    flush(&handle, &mut events).await;

    assert_eq!(clock.seeks(), vec![70.0]);
    let snapshot = handle.snapshot();
    assert_eq!(snapshot.current_time, 70.0);
    assert_eq!(snapshot.bookmarks.unwrap()[0].label, "1:10");

    handle.shutdown();
    task.await.unwrap();
}

#[tokio::test]
async fn test_subscribers_see_changes() {
    let clock = RecordingClock::new(0.0, 60.0, true);
    let (handle, runtime, _events) =
        OverlayRuntime::new(&config(InputMode::Touch), Box::new(clock)).unwrap();
    let mut changes = handle.subscribe();
    let task = runtime.spawn();

    handle.send(OverlayInput::SelectRate(1.5));
    let changed = timeout(Duration::from_secs(1), changes.wait_for_change())
        .await
        .unwrap();
    assert!(changed);
    assert_eq!(handle.snapshot().rate_label, "150%");

    handle.shutdown();
    task.await.unwrap();
}

#[tokio::test]
async fn test_shutdown_stops_accepting_input() {
    let clock = RecordingClock::new(0.0, 60.0, true);
    let (handle, runtime, _events) =
        OverlayRuntime::new(&config(InputMode::DirectionalPad), Box::new(clock)).unwrap();
    let task = runtime.spawn();

    assert!(!handle.is_shut_down());
    handle.shutdown();
    task.await.unwrap();

    assert!(handle.is_shut_down());
    assert!(!handle.send(OverlayInput::Tap));
}

#[tokio::test]
async fn test_now_playing_bridge_receives_updates() {
    let clock = RecordingClock::new(10.0, 300.0, true);
    let bridge = RecordingBridge::new();
    let (handle, runtime, mut events) =
        OverlayRuntime::new(&config(InputMode::Touch), Box::new(clock)).unwrap();
    let task = runtime.with_now_playing(Box::new(bridge.clone())).spawn();

    handle.send(OverlayInput::SetMetadata(NowPlayingMetadata {
        title: "Big Buck Bunny".to_string(),
        artist: Some("Blender Foundation".to_string()),
        media_kind: MediaKind::Video,
        ..Default::default()
    }));
    handle.send(OverlayInput::Remote(RemoteCommand::Pause));
    flush(&handle, &mut events).await;

    let metadata = bridge.metadata();
    assert_eq!(metadata.len(), 1);
    assert_eq!(metadata[0].title, "Big Buck Bunny");

    let status = bridge.last_status().unwrap();
    assert!(!status.is_playing);
    assert_eq!(status.position, 10.0);
    assert_eq!(status.duration, 300.0);
    assert_eq!(handle.snapshot().title.as_deref(), Some("Big Buck Bunny"));

    handle.shutdown();
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_runtime_delivers_debounced_commit() {
    let clock = RecordingClock::new(0.0, 10.0, true);
    let (handle, runtime, _events) =
        OverlayRuntime::new(&config(InputMode::DirectionalPad), Box::new(clock.clone())).unwrap();
    let task = runtime.spawn();

    // Reach the scrubber, then step three times
    for _ in 0..7 {
        handle.send(OverlayInput::Press(Direction::Right));
    }

    sleep(Duration::from_millis(500)).await;
    assert!(clock.seeks().is_empty());

    sleep(Duration::from_millis(200)).await;
    assert_eq!(clock.seeks(), vec![3.0]);
    assert!(handle.snapshot().scrub.is_none());

    handle.shutdown();
    task.await.unwrap();
}
