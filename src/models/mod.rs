//! Data models for songrec
//!
//! Value records mirrored from the recommendation backend's requests and responses.

mod genre;
mod popular;
mod rating;
mod recommendation;
mod song;
mod user;

pub use genre::Genre;
pub use popular::PopularSong;
pub use rating::{valid_ratings, RateRequest, Rating, UserRatings};
pub use recommendation::{RecommendResponse, RecommendationItem, RecommendationRequest, TopN};
pub use song::{song_key, Song};
pub use user::{Credentials, Session};
