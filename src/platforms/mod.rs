pub mod now_playing;

pub use now_playing::{MediaKind, NowPlayingBridge, NowPlayingMetadata, PlaybackStatus, RemoteCommand};
