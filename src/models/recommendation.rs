//! Recommendation request/response models

use serde::{Deserialize, Serialize};

use super::{song_key, Genre};

/// Bounded number of results asked from the recommender
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TopN(u32);

impl TopN {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 20;

    pub fn new(value: u32) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for TopN {
    fn default() -> Self {
        Self(10)
    }
}

impl TryFrom<u32> for TopN {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        TopN::new(value).ok_or_else(|| {
            format!(
                "top_n must be between {} and {}, got {}",
                TopN::MIN,
                TopN::MAX,
                value
            )
        })
    }
}

impl From<TopN> for u32 {
    fn from(value: TopN) -> Self {
        value.0
    }
}

/// Body of `POST /recommend`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub user_id: String,
    pub judul_lagu: String,
    pub artis: String,
    pub genre: Genre,
    pub top_n: TopN,
}

/// A backend-scored song suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationItem {
    #[serde(rename = "Judul Lagu")]
    pub title: String,
    #[serde(rename = "Artis")]
    pub artist: String,
    #[serde(rename = "Skor Hybrid", default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub spotify_url: Option<String>,
}

impl RecommendationItem {
    pub fn song_key(&self) -> String {
        song_key(&self.title, &self.artist)
    }

    /// Hybrid score rounded to three decimals for display
    pub fn score_label(&self) -> Option<String> {
        self.score.map(|s| format!("{:.3}", s))
    }
}

/// The recommender answers either with a bare list or wrapped in `recommendations`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RecommendResponse {
    Wrapped {
        recommendations: Vec<RecommendationItem>,
    },
    Bare(Vec<RecommendationItem>),
}

impl RecommendResponse {
    pub fn into_items(self) -> Vec<RecommendationItem> {
        match self {
            RecommendResponse::Wrapped { recommendations } => recommendations,
            RecommendResponse::Bare(items) => items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_n_bounds() {
        assert!(TopN::new(0).is_none());
        assert!(TopN::new(21).is_none());
        assert_eq!(TopN::new(1).map(|t| t.get()), Some(1));
        assert_eq!(TopN::new(20).map(|t| t.get()), Some(20));
        assert_eq!(TopN::default().get(), 10);
    }

    #[test]
    fn test_top_n_rejects_out_of_range_json() {
        assert!(serde_json::from_str::<TopN>("25").is_err());
        assert_eq!(serde_json::from_str::<TopN>("5").unwrap().get(), 5);
    }

    #[test]
    fn test_request_wire_format() {
        let request = RecommendationRequest {
            user_id: "alice".into(),
            judul_lagu: "Blinding Lights".into(),
            artis: "The Weeknd".into(),
            genre: Genre::Pop,
            top_n: TopN::default(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "user_id": "alice",
                "judul_lagu": "Blinding Lights",
                "artis": "The Weeknd",
                "genre": "pop",
                "top_n": 10
            })
        );
    }

    #[test]
    fn test_response_shapes() {
        let bare = r#"[{"Judul Lagu": "Hello", "Artis": "Adele", "Skor Hybrid": 0.91234, "spotify_url": "https://open.spotify.com/track/1"}]"#;
        let items = serde_json::from_str::<RecommendResponse>(bare)
            .unwrap()
            .into_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].song_key(), "Hello - Adele");
        assert_eq!(items[0].score_label().as_deref(), Some("0.912"));

        let wrapped = r#"{"recommendations": [{"Judul Lagu": "Hello", "Artis": "Adele"}]}"#;
        let items = serde_json::from_str::<RecommendResponse>(wrapped)
            .unwrap()
            .into_items();
        assert_eq!(items[0].score, None);
        assert_eq!(items[0].spotify_url, None);
    }
}
