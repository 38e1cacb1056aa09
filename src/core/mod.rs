//! Client state model for songrec
//!
//! Each screen of the client is a plain struct; `App` wires user events to
//! backend calls and applies the responses.

pub mod app;
pub mod catalog;
pub mod form;
pub mod popular;
pub mod ratings;
pub mod results;

pub use app::{App, MainScreenData, Screen};
pub use catalog::Catalog;
pub use form::RecommendForm;
pub use popular::PopularPanel;
pub use ratings::RatingBook;
pub use results::{ResultRow, ResultsView};

use thiserror::Error;

/// Input rejected before anything is sent to the backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Username and password are required")]
    MissingCredentials,

    #[error("Choose an artist first")]
    MissingArtist,

    #[error("Choose a song")]
    MissingSong,

    #[error("Choose a genre")]
    MissingGenre,

    #[error("\"{title}\" is not a song by {artist}")]
    SongNotByArtist { title: String, artist: String },

    #[error("Unknown genre \"{0}\"")]
    UnknownGenre(String),

    #[error("Result count must be between 1 and 20, got {0}")]
    TopNOutOfRange(u32),

    #[error("Rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(u8),

    #[error("Not logged in")]
    NotLoggedIn,
}
