//! Song catalog model

use serde::{Deserialize, Serialize};

/// A song in the backend catalog, as returned by `GET /lagu`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Song {
    pub title: String,
    pub artist: String,
}

impl Song {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
        }
    }

    /// Composite key used to correlate ratings with this song
    pub fn key(&self) -> String {
        song_key(&self.title, &self.artist)
    }
}

/// Build the "title - artist" key the backend stores ratings under
pub fn song_key(title: &str, artist: &str) -> String {
    format!("{} - {}", title, artist)
}
