//! Recording in-memory `MusicApi` for tests

use async_trait::async_trait;
use parking_lot::Mutex;
use std::time::Duration;

use super::{ClientError, MusicApi};
use crate::models::{
    Credentials, PopularSong, RateRequest, RecommendationItem, RecommendationRequest, Song,
    UserRatings,
};

/// A request the mock received
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Login(Credentials),
    Register(Credentials),
    ListSongs,
    UserRatings(String),
    Recommend(RecommendationRequest),
    Rate(RateRequest),
    Popular,
}

/// Canned outcome for an endpoint: `Ok(value)` or an API failure `(status, body)`
pub type Outcome<T> = Result<T, (u16, String)>;

pub struct MockApi {
    pub login: Outcome<()>,
    pub register: Outcome<()>,
    pub songs: Outcome<Vec<Song>>,
    pub ratings: Outcome<UserRatings>,
    pub recommend: Outcome<Vec<RecommendationItem>>,
    pub rate: Outcome<()>,
    pub popular: Outcome<Vec<PopularSong>>,
    /// Delay before every answer
    pub latency: Option<Duration>,
    pub recorded: Mutex<Vec<Call>>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            login: Ok(()),
            register: Ok(()),
            songs: Ok(Vec::new()),
            ratings: Ok(UserRatings::new()),
            recommend: Ok(Vec::new()),
            rate: Ok(()),
            popular: Ok(Vec::new()),
            latency: None,
            recorded: Mutex::new(Vec::new()),
        }
    }
}

impl MockApi {
    pub fn calls(&self) -> Vec<Call> {
        self.recorded.lock().clone()
    }

    async fn record<T: Clone>(&self, call: Call, outcome: &Outcome<T>) -> Result<T, ClientError> {
        self.recorded.lock().push(call);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        outcome
            .clone()
            .map_err(|(status, body)| ClientError::from_response(status, &body))
    }
}

#[async_trait]
impl MusicApi for MockApi {
    async fn login(&self, credentials: &Credentials) -> Result<(), ClientError> {
        self.record(Call::Login(credentials.clone()), &self.login).await
    }

    async fn register(&self, credentials: &Credentials) -> Result<(), ClientError> {
        self.record(Call::Register(credentials.clone()), &self.register).await
    }

    async fn list_songs(&self) -> Result<Vec<Song>, ClientError> {
        self.record(Call::ListSongs, &self.songs).await
    }

    async fn user_ratings(&self, user: &str) -> Result<UserRatings, ClientError> {
        self.record(Call::UserRatings(user.to_string()), &self.ratings).await
    }

    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<RecommendationItem>, ClientError> {
        self.record(Call::Recommend(request.clone()), &self.recommend).await
    }

    async fn rate(&self, request: &RateRequest) -> Result<(), ClientError> {
        self.record(Call::Rate(request.clone()), &self.rate).await
    }

    async fn popular(&self) -> Result<Vec<PopularSong>, ClientError> {
        self.record(Call::Popular, &self.popular).await
    }
}
