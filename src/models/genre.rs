//! Genre filter accepted by the recommender

use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of genres the backend can filter on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    Classical,
    Edm,
    Hiphop,
    Jazz,
    Indie,
    Latin,
    Kpop,
    Pop,
    Rnb,
    Rock,
    Ipop,
}

impl Genre {
    /// All genres, in the order they are offered to the user
    pub const ALL: [Genre; 11] = [
        Genre::Classical,
        Genre::Edm,
        Genre::Hiphop,
        Genre::Jazz,
        Genre::Indie,
        Genre::Latin,
        Genre::Kpop,
        Genre::Pop,
        Genre::Rnb,
        Genre::Rock,
        Genre::Ipop,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Classical => "classical",
            Genre::Edm => "edm",
            Genre::Hiphop => "hiphop",
            Genre::Jazz => "jazz",
            Genre::Indie => "indie",
            Genre::Latin => "latin",
            Genre::Kpop => "kpop",
            Genre::Pop => "pop",
            Genre::Rnb => "rnb",
            Genre::Rock => "rock",
            Genre::Ipop => "ipop",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|g| g.as_str() == s)
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
