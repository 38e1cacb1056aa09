//! Popular songs model

use serde::{Deserialize, Deserializer, Serialize};

/// An entry of `GET /popular`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularSong {
    pub name: String,
    /// Artist names; the backend sends either a list or one joined string
    #[serde(default, deserialize_with = "deserialize_artists")]
    pub artists: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub spotify_url: Option<String>,
}

impl PopularSong {
    pub fn artists_label(&self) -> String {
        self.artists.join(", ")
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ArtistsField {
    List(Vec<String>),
    Joined(String),
}

fn deserialize_artists<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let field = Option::<ArtistsField>::deserialize(deserializer)?;
    Ok(match field {
        Some(ArtistsField::List(list)) => list,
        Some(ArtistsField::Joined(joined)) if joined.trim().is_empty() => Vec::new(),
        Some(ArtistsField::Joined(joined)) => vec![joined],
        None => Vec::new(),
    })
}
