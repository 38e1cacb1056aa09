//! Access to the recommendation backend
//!
//! `MusicApi` is the seam between the state model and the network. `ApiClient`
//! implements it over HTTP; tests swap in a recording mock.

mod error;
mod http;
#[cfg(test)]
pub mod mock;

pub use error::ClientError;
pub use http::ApiClient;

use async_trait::async_trait;

use crate::models::{
    Credentials, PopularSong, RateRequest, RecommendationItem, RecommendationRequest, Song,
    UserRatings,
};

/// Every backend call the client makes
#[async_trait]
pub trait MusicApi: Send + Sync {
    /// `POST /login`
    async fn login(&self, credentials: &Credentials) -> Result<(), ClientError>;

    /// `POST /register`
    async fn register(&self, credentials: &Credentials) -> Result<(), ClientError>;

    /// `GET /lagu`
    async fn list_songs(&self) -> Result<Vec<Song>, ClientError>;

    /// `GET /get_user_ratings/{user}`
    async fn user_ratings(&self, user: &str) -> Result<UserRatings, ClientError>;

    /// `POST /recommend`
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<RecommendationItem>, ClientError>;

    /// `POST /rate`
    async fn rate(&self, request: &RateRequest) -> Result<(), ClientError>;

    /// `GET /popular`
    async fn popular(&self) -> Result<Vec<PopularSong>, ClientError>;
}
