//! HTTP implementation of the backend API

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::debug;

use super::{ClientError, MusicApi};
use crate::models::{
    valid_ratings, Credentials, PopularSong, RateRequest, RecommendResponse, RecommendationItem,
    RecommendationRequest, Song, UserRatings,
};

/// reqwest-backed client for the recommendation backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|_| ClientError::InvalidBaseUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self { client, base_url })
    }

    /// Append path segments to the base URL, percent-encoding each one
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ClientError> {
        let url = self.endpoint(segments)?;
        debug!("GET {}", url);
        let resp = self.client.get(url).send().await?;
        read_json(resp).await
    }

    async fn post_json<B: serde::Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<Response, ClientError> {
        let url = self.endpoint(segments)?;
        debug!("POST {}", url);
        let resp = self.client.post(url).json(body).send().await?;
        check_status(resp).await
    }
}

/// Turn a non-success response into `ClientError::Api`
async fn check_status(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    Err(ClientError::from_response(status.as_u16(), &body))
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let resp = check_status(resp).await?;
    let bytes = resp.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl MusicApi for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<(), ClientError> {
        self.post_json(&["login"], credentials).await?;
        Ok(())
    }

    async fn register(&self, credentials: &Credentials) -> Result<(), ClientError> {
        self.post_json(&["register"], credentials).await?;
        Ok(())
    }

    async fn list_songs(&self) -> Result<Vec<Song>, ClientError> {
        // a null body means an empty catalog
        let songs: Option<Vec<Song>> = self.get_json(&["lagu"]).await?;
        Ok(songs.unwrap_or_default())
    }

    async fn user_ratings(&self, user: &str) -> Result<UserRatings, ClientError> {
        let raw: Option<HashMap<String, serde_json::Value>> =
            self.get_json(&["get_user_ratings", user]).await?;
        Ok(valid_ratings(raw.unwrap_or_default()))
    }

    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<RecommendationItem>, ClientError> {
        let resp = self.post_json(&["recommend"], request).await?;
        let bytes = resp.bytes().await?;
        let parsed: RecommendResponse = serde_json::from_slice(&bytes)?;
        Ok(parsed.into_items())
    }

    async fn rate(&self, request: &RateRequest) -> Result<(), ClientError> {
        self.post_json(&["rate"], request).await?;
        Ok(())
    }

    async fn popular(&self) -> Result<Vec<PopularSong>, ClientError> {
        let songs: Option<Vec<PopularSong>> = self.get_json(&["popular"]).await?;
        Ok(songs.unwrap_or_default())
    }
}
