use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    #[default]
    Video,
    Audio,
}

/// Static description of the current item for the OS "Now Playing" surface.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NowPlayingMetadata {
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub artwork_ref: Option<String>,
    pub media_kind: MediaKind,
}

/// Periodic transport status pushed alongside the metadata.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub is_playing: bool,
    pub position: f64,
    pub duration: f64,
}

/// Transport commands arriving from the OS media session (lock screen,
/// headset buttons, remote apps).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RemoteCommand {
    Play,
    Pause,
    TogglePlayPause,
    Seek(f64),
    Skip(f64),
}

/// Receiver side of the Now Playing integration. Registration with the OS
/// is the implementor's business; the overlay only pushes state.
pub trait NowPlayingBridge: Send {
    fn publish_metadata(&mut self, metadata: &NowPlayingMetadata);
    fn publish_status(&mut self, status: &PlaybackStatus);
}
