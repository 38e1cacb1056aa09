//! Popular songs panel

use tracing::{debug, error};

use crate::client::{ClientError, MusicApi};
use crate::models::PopularSong;

/// Most songs the panel ever renders
pub const POPULAR_LIMIT: usize = 15;

/// Independently loaded grid of top songs
#[derive(Debug, Clone, Default)]
pub struct PopularPanel {
    songs: Vec<PopularSong>,
}

impl PopularPanel {
    /// One-shot fetch; a failure is logged and leaves the panel empty
    pub async fn load(&mut self, api: &dyn MusicApi) {
        let result = api.popular().await;
        self.apply(result);
    }

    pub fn apply(&mut self, result: Result<Vec<PopularSong>, ClientError>) {
        match result {
            Ok(songs) => {
                debug!("Loaded {} popular songs", songs.len());
                self.songs = songs;
            }
            Err(e) => {
                error!("Failed to load popular songs: {}", e);
                self.songs.clear();
            }
        }
    }

    /// The songs actually rendered, capped at the panel size
    pub fn visible(&self) -> &[PopularSong] {
        let end = self.songs.len().min(POPULAR_LIMIT);
        &self.songs[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{Call, MockApi};

    fn popular(n: usize) -> Vec<PopularSong> {
        (0..n)
            .map(|i| PopularSong {
                name: format!("Song {}", i),
                artists: vec![format!("Artist {}", i)],
                image_url: None,
                spotify_url: None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_renders_at_most_fifteen() {
        let api = MockApi {
            popular: Ok(popular(40)),
            ..Default::default()
        };
        let mut panel = PopularPanel::default();
        panel.load(&api).await;

        assert_eq!(POPULAR_LIMIT, 15);
        assert_eq!(panel.visible().len(), 15);
        assert_eq!(panel.visible()[0].name, "Song 0");
        assert_eq!(panel.visible()[14].name, "Song 14");
        assert_eq!(api.calls(), vec![Call::Popular]);
    }

    #[tokio::test]
    async fn test_short_list_and_failure() {
        let api = MockApi {
            popular: Ok(popular(3)),
            ..Default::default()
        };
        let mut panel = PopularPanel::default();
        panel.load(&api).await;
        assert_eq!(panel.visible().len(), 3);

        let failing = MockApi {
            popular: Err((500, String::new())),
            ..Default::default()
        };
        panel.load(&failing).await;
        assert!(panel.visible().is_empty());
    }
}
