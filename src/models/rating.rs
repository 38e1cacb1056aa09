//! Rating models

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// A 1-5 star rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

// the backend may hand ratings back as floats
impl TryFrom<f64> for Rating {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        let rounded = value.round();
        if (Self::MIN as f64..=Self::MAX as f64).contains(&rounded) {
            Ok(Self(rounded as u8))
        } else {
            Err(format!("rating must be between 1 and 5, got {}", value))
        }
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

/// Ratings of one user, keyed by song key
pub type UserRatings = HashMap<String, Rating>;

/// Keep the usable entries of a stored ratings map
///
/// Values that are not a number in 1..=5 after rounding are skipped, so one
/// bad row does not hide the rest.
pub fn valid_ratings(raw: HashMap<String, serde_json::Value>) -> UserRatings {
    raw.into_iter()
        .filter_map(|(song, value)| {
            match value.as_f64().map(Rating::try_from) {
                Some(Ok(rating)) => Some((song, rating)),
                _ => {
                    warn!("Skipping stored rating for {}: {}", song, value);
                    None
                }
            }
        })
        .collect()
}

/// Body of `POST /rate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRequest {
    pub user: String,
    pub song: String,
    pub rating: Rating,
}
