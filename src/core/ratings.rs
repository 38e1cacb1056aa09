//! Local cache of the user's ratings

use crate::models::{Rating, UserRatings};

/// Ratings keyed by song key, updated only after the backend acknowledges a write
#[derive(Debug, Clone, Default)]
pub struct RatingBook {
    ratings: UserRatings,
}

impl RatingBook {
    pub fn new(ratings: UserRatings) -> Self {
        Self { ratings }
    }

    pub fn get(&self, song_key: &str) -> Option<Rating> {
        self.ratings.get(song_key).copied()
    }

    pub fn record(&mut self, song_key: impl Into<String>, rating: Rating) {
        self.ratings.insert(song_key.into(), rating);
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// All ratings sorted by song key
    pub fn sorted(&self) -> Vec<(&str, Rating)> {
        let mut entries: Vec<_> = self
            .ratings
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_overwrites() {
        let mut book = RatingBook::default();
        assert!(book.is_empty());

        book.record("Hello - Adele", Rating::new(2).unwrap());
        book.record("Hello - Adele", Rating::new(5).unwrap());
        assert_eq!(book.len(), 1);
        assert_eq!(book.get("Hello - Adele"), Rating::new(5));
        assert_eq!(book.get("Yellow - Coldplay"), None);
    }

    #[test]
    fn test_sorted() {
        let mut book = RatingBook::default();
        book.record("b - x", Rating::new(1).unwrap());
        book.record("a - y", Rating::new(3).unwrap());
        let keys: Vec<_> = book.sorted().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a - y", "b - x"]);
    }
}
