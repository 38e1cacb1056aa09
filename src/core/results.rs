//! Rendered view of recommendation results

use serde::Serialize;

use super::RatingBook;
use crate::models::RecommendationItem;

/// One recommendation as displayed, joined with the user's rating
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub song_key: String,
    pub title: String,
    pub artist: String,
    pub score: Option<f64>,
    pub score_label: Option<String>,
    pub spotify_url: Option<String>,
    pub rating: Option<u8>,
}

impl ResultRow {
    pub fn new(item: &RecommendationItem, ratings: &RatingBook) -> Self {
        let song_key = item.song_key();
        let rating = ratings.get(&song_key).map(|r| r.get());
        Self {
            song_key,
            title: item.title.clone(),
            artist: item.artist.clone(),
            score: item.score,
            score_label: item.score_label(),
            spotify_url: item.spotify_url.clone(),
            rating,
        }
    }

    /// Filled/empty stars, e.g. `★★★☆☆`
    pub fn stars(&self) -> String {
        let filled = self.rating.unwrap_or(0) as usize;
        format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled.min(5)))
    }
}

/// Snapshot of the results panel
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultsView {
    pub loading: bool,
    pub error: Option<String>,
    pub visible: bool,
    pub items: Vec<ResultRow>,
}
