//! Song catalog and the artist set derived from it

use std::collections::HashSet;

use crate::models::Song;

/// Songs known to the backend, used to populate the recommendation form
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    songs: Vec<Song>,
    artists: Vec<String>,
}

impl Catalog {
    pub fn new(songs: Vec<Song>) -> Self {
        // unique artists, in first-seen order
        let mut seen = HashSet::new();
        let artists = songs
            .iter()
            .filter(|s| seen.insert(s.artist.as_str()))
            .map(|s| s.artist.clone())
            .collect();

        Self { songs, artists }
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn artists(&self) -> &[String] {
        &self.artists
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Songs by exactly this artist
    pub fn songs_by<'a>(&'a self, artist: &'a str) -> impl Iterator<Item = &'a Song> + 'a {
        self.songs.iter().filter(move |s| s.artist == artist)
    }

    pub fn contains(&self, title: &str, artist: &str) -> bool {
        self.songs_by(artist).any(|s| s.title == title)
    }
}
