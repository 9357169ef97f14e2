use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::BookmarkId;
use crate::utils::format_seconds;

/// A named time marker inside the current item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: BookmarkId,
    pub label: String,
    /// Seconds from the start, stored exactly as captured
    pub time: f64,
}

/// Insertion-ordered bookmarks for the item being played.
#[derive(Debug, Default, Clone)]
pub struct BookmarkRegistry {
    bookmarks: Vec<Bookmark>,
}

impl BookmarkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bookmark at `time`, labelled with the formatted time.
    pub fn add(&mut self, time: f64) -> Bookmark {
        let time = if time.is_finite() { time.max(0.0) } else { 0.0 };
        let bookmark = Bookmark {
            id: BookmarkId::generate(),
            label: format_seconds(time),
            time,
        };
        debug!("Added bookmark {} at {}", bookmark.id, bookmark.label);
        self.bookmarks.push(bookmark.clone());
        bookmark
    }

    /// Stored time for `id`, or `None` when the bookmark no longer exists.
    pub fn jump_target(&self, id: &BookmarkId) -> Option<f64> {
        self.get(id).map(|bookmark| bookmark.time)
    }

    /// Returns false for unknown ids.
    pub fn remove(&mut self, id: &BookmarkId) -> bool {
        let Some(index) = self.bookmarks.iter().position(|b| &b.id == id) else {
            debug!("Ignoring removal of unknown bookmark {}", id);
            return false;
        };
        let removed = self.bookmarks.remove(index);
        debug!("Removed bookmark {} ({})", removed.id, removed.label);
        true
    }

    pub fn get(&self, id: &BookmarkId) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|bookmark| &bookmark.id == id)
    }

    pub fn list(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }
}
