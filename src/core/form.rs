//! Recommendation form state

use serde::Serialize;

use super::{Catalog, FormError};
use crate::models::{Genre, RecommendationRequest, Song, TopN};

/// Fields of the recommendation form
///
/// The song field depends on the artist field: a song can only be picked once
/// an artist is chosen, and picking another artist clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecommendForm {
    user_id: String,
    artist: Option<String>,
    song: Option<String>,
    genre: Option<Genre>,
    top_n: TopN,
}

impl RecommendForm {
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn artist(&self) -> Option<&str> {
        self.artist.as_deref()
    }

    pub fn song(&self) -> Option<&str> {
        self.song.as_deref()
    }

    pub fn genre(&self) -> Option<Genre> {
        self.genre
    }

    pub fn top_n(&self) -> TopN {
        self.top_n
    }

    pub fn bind_user(&mut self, user: &str) {
        self.user_id = user.to_string();
    }

    /// Choose (or clear) the artist; a different artist resets the song
    pub fn select_artist(&mut self, artist: Option<String>) {
        let artist = artist.filter(|a| !a.trim().is_empty());
        if artist != self.artist {
            self.song = None;
        }
        self.artist = artist;
    }

    /// Songs selectable for the current artist
    pub fn song_options<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Song> {
        match self.artist.as_deref() {
            Some(artist) => catalog
                .songs()
                .iter()
                .filter(|s| s.artist == artist)
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn select_song(&mut self, title: Option<String>, catalog: &Catalog) -> Result<(), FormError> {
        let Some(title) = title.filter(|t| !t.trim().is_empty()) else {
            self.song = None;
            return Ok(());
        };

        let artist = self.artist.as_deref().ok_or(FormError::MissingArtist)?;
        if !catalog.contains(&title, artist) {
            return Err(FormError::SongNotByArtist {
                title,
                artist: artist.to_string(),
            });
        }

        self.song = Some(title);
        Ok(())
    }

    pub fn select_genre(&mut self, genre: Option<Genre>) {
        self.genre = genre;
    }

    pub fn set_top_n(&mut self, value: u32) -> Result<(), FormError> {
        self.top_n = TopN::new(value).ok_or(FormError::TopNOutOfRange(value))?;
        Ok(())
    }

    /// Validate the required fields and build the request body
    pub fn to_request(&self) -> Result<RecommendationRequest, FormError> {
        if self.user_id.is_empty() {
            return Err(FormError::NotLoggedIn);
        }
        let artist = self.artist.clone().ok_or(FormError::MissingArtist)?;
        let song = self.song.clone().ok_or(FormError::MissingSong)?;
        let genre = self.genre.ok_or(FormError::MissingGenre)?;

        Ok(RecommendationRequest {
            user_id: self.user_id.clone(),
            judul_lagu: song,
            artis: artist,
            genre,
            top_n: self.top_n,
        })
    }

    /// Back to an empty form with the default result count
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Parse user input into a genre of the fixed set
pub fn parse_genre(input: &str) -> Result<Genre, FormError> {
    Genre::parse(input).ok_or_else(|| FormError::UnknownGenre(input.to_string()))
}
