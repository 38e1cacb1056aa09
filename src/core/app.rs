//! Client application state
//!
//! `App` is the session holder: it decides which screen is shown and maps
//! every user event to one backend call plus one state update.
//!
//! Each backend-bound event is split into a `begin_*` step that validates
//! input and marks the state, and a `finish_*` step that applies the
//! response. Shared surfaces run the call in between without holding the
//! state, so a slow request never blocks readers.

use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::{
    Catalog, FormError, PopularPanel, RatingBook, RecommendForm, ResultRow, ResultsView,
};
use crate::client::{ClientError, MusicApi};
use crate::models::{
    Credentials, Genre, PopularSong, RateRequest, Rating, RecommendationItem,
    RecommendationRequest, Session, Song, UserRatings,
};
use crate::stores::SessionStore;

const LOGIN_FAILED: &str = "Login failed";
const REGISTER_FAILED: &str = "Registration failed";
const REGISTER_OK: &str = "Registration successful! Please log in.";
const SERVER_ERROR: &str = "Server Error";

/// Which screen the client shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Login,
    Register,
    Main,
}

/// Session-level snapshot exposed to surfaces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppState {
    pub screen: Screen,
    pub user: Option<String>,
    pub notice: Option<String>,
    pub login_error: Option<String>,
    pub register_error: Option<String>,
}

/// Responses the main screen loads when it appears
#[derive(Debug)]
pub struct MainScreenData {
    songs: Result<Vec<Song>, ClientError>,
    ratings: Result<UserRatings, ClientError>,
    popular: Result<Vec<PopularSong>, ClientError>,
}

impl MainScreenData {
    /// Catalog, ratings and popular songs, fetched concurrently
    pub async fn fetch(api: &dyn MusicApi, user: &str) -> Self {
        let (songs, ratings, popular) =
            tokio::join!(api.list_songs(), api.user_ratings(user), api.popular());
        Self {
            songs,
            ratings,
            popular,
        }
    }
}

/// A recommendation request on its way to the backend
#[derive(Debug, Clone)]
pub struct PendingRecommendation {
    pub request: RecommendationRequest,
    ticket: u64,
}

pub struct App {
    api: Arc<dyn MusicApi>,
    sessions: SessionStore,
    screen: Screen,
    session: Option<Session>,
    notice: Option<String>,
    login_error: Option<String>,
    register_error: Option<String>,
    catalog: Catalog,
    ratings: RatingBook,
    form: RecommendForm,
    results: Vec<RecommendationItem>,
    loading: bool,
    error: Option<String>,
    show_results: bool,
    // bumped per submission; only the latest one may apply its response
    submissions: u64,
    popular: PopularPanel,
}

impl App {
    /// Build the app, restoring a persisted session when there is one
    pub fn restore(api: Arc<dyn MusicApi>, sessions: SessionStore) -> Self {
        let session = match sessions.load() {
            Ok(session) => session,
            Err(e) => {
                warn!("Ignoring unreadable session: {}", e);
                None
            }
        };

        let mut form = RecommendForm::default();
        if let Some(ref s) = session {
            debug!("Restored session for {}", s.username);
            form.bind_user(&s.username);
        }

        Self {
            api,
            sessions,
            screen: if session.is_some() {
                Screen::Main
            } else {
                Screen::Login
            },
            session,
            notice: None,
            login_error: None,
            register_error: None,
            catalog: Catalog::default(),
            ratings: RatingBook::default(),
            form,
            results: Vec::new(),
            loading: false,
            error: None,
            show_results: false,
            submissions: 0,
            popular: PopularPanel::default(),
        }
    }

    // ========== Accessors ==========

    /// Handle to the backend, for running a call outside the state lock
    pub fn api(&self) -> Arc<dyn MusicApi> {
        Arc::clone(&self.api)
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn username(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.username.as_str())
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn login_error(&self) -> Option<&str> {
        self.login_error.as_deref()
    }

    pub fn register_error(&self) -> Option<&str> {
        self.register_error.as_deref()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn ratings(&self) -> &RatingBook {
        &self.ratings
    }

    pub fn form(&self) -> &RecommendForm {
        &self.form
    }

    pub fn results(&self) -> &[RecommendationItem] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn popular(&self) -> &PopularPanel {
        &self.popular
    }

    pub fn state(&self) -> AppState {
        AppState {
            screen: self.screen,
            user: self.username().map(str::to_string),
            notice: self.notice.clone(),
            login_error: self.login_error.clone(),
            register_error: self.register_error.clone(),
        }
    }

    pub fn results_view(&self) -> ResultsView {
        ResultsView {
            loading: self.loading,
            error: self.error.clone(),
            visible: self.show_results && !self.results.is_empty(),
            items: self
                .results
                .iter()
                .map(|item| ResultRow::new(item, &self.ratings))
                .collect(),
        }
    }

    // ========== Login / Register ==========

    pub fn show_register(&mut self) {
        if self.session.is_none() {
            self.screen = Screen::Register;
            self.register_error = None;
            self.notice = None;
        }
    }

    pub fn show_login(&mut self) {
        if self.session.is_none() {
            self.screen = Screen::Login;
            self.login_error = None;
        }
    }

    /// Submit credentials; on success the session is set and persisted
    ///
    /// A rejected login is reported through `login_error`; the returned error
    /// only covers failing to persist the session locally.
    pub async fn login(&mut self, credentials: Credentials) -> Result<()> {
        let Some(credentials) = self.begin_login(credentials) else {
            return Ok(());
        };
        let result = self.api.login(&credentials).await;
        self.finish_login(&credentials, result)
    }

    /// Check the credentials; `None` means nothing should be sent
    ///
    /// The returned credentials are the ones to send, and the username in
    /// them becomes the session identity.
    pub fn begin_login(&mut self, credentials: Credentials) -> Option<Credentials> {
        self.login_error = None;

        if !credentials.is_complete() {
            self.login_error = Some(FormError::MissingCredentials.to_string());
            return None;
        }
        Some(credentials.trimmed())
    }

    pub fn finish_login(
        &mut self,
        credentials: &Credentials,
        result: Result<(), ClientError>,
    ) -> Result<()> {
        match result {
            Ok(()) => {
                let session = Session::new(credentials.username.as_str());
                self.sessions.save(&session)?;
                info!("Logged in as {}", session.username);

                self.form.bind_user(&session.username);
                self.session = Some(session);
                self.notice = None;
                self.login_error = None;
                self.screen = Screen::Main;
            }
            Err(e) => {
                warn!("Login rejected: {}", e);
                self.login_error = Some(e.user_message(LOGIN_FAILED));
            }
        }

        Ok(())
    }

    /// Create an account; success returns to the login screen with a notice
    pub async fn register(&mut self, credentials: Credentials) {
        let Some(credentials) = self.begin_register(credentials) else {
            return;
        };
        let result = self.api.register(&credentials).await;
        self.finish_register(&credentials, result);
    }

    pub fn begin_register(&mut self, credentials: Credentials) -> Option<Credentials> {
        self.register_error = None;
        self.notice = None;

        if !credentials.is_complete() {
            self.register_error = Some(FormError::MissingCredentials.to_string());
            return None;
        }
        Some(credentials.trimmed())
    }

    pub fn finish_register(&mut self, credentials: &Credentials, result: Result<(), ClientError>) {
        match result {
            Ok(()) => {
                info!("Registered {}", credentials.username);
                self.notice = Some(REGISTER_OK.to_string());
                if self.session.is_none() {
                    self.screen = Screen::Login;
                }
            }
            Err(e) => {
                warn!("Registration rejected: {}", e);
                self.register_error = Some(e.user_message(REGISTER_FAILED));
            }
        }
    }

    /// Drop the session and everything derived from it
    pub fn logout(&mut self) -> Result<()> {
        self.sessions.clear()?;

        if let Some(session) = self.session.take() {
            info!("Logged out {}", session.username);
        }

        self.screen = Screen::Login;
        self.form.reset();
        self.results.clear();
        self.show_results = false;
        self.error = None;
        // a recommendation still in flight must not land on the next session
        self.submissions += 1;
        self.loading = false;
        self.catalog = Catalog::default();
        self.ratings = RatingBook::default();
        self.popular = PopularPanel::default();
        Ok(())
    }

    // ========== Session start ==========

    /// Fetch the catalog and the user's ratings, concurrently
    pub async fn start_session(&mut self) {
        let Some(user) = self.username().map(str::to_string) else {
            return;
        };

        let api = Arc::clone(&self.api);
        let (songs, ratings) = tokio::join!(api.list_songs(), api.user_ratings(&user));
        self.apply_catalog(songs);
        self.apply_ratings(ratings);
    }

    /// Everything the main screen loads when it appears
    pub async fn activate(&mut self) {
        let Some(user) = self.username().map(str::to_string) else {
            return;
        };

        let api = Arc::clone(&self.api);
        let data = MainScreenData::fetch(api.as_ref(), &user).await;
        self.apply_main(&user, data);
    }

    /// Apply main screen data fetched for `user`; dropped if the session changed
    pub fn apply_main(&mut self, user: &str, data: MainScreenData) {
        if self.username() != Some(user) {
            debug!("Dropping main screen data for {}", user);
            return;
        }

        self.apply_catalog(data.songs);
        self.apply_ratings(data.ratings);
        self.popular.apply(data.popular);
    }

    pub async fn load_popular(&mut self) {
        let api = Arc::clone(&self.api);
        self.popular.load(api.as_ref()).await;
    }

    fn apply_catalog(&mut self, songs: Result<Vec<Song>, ClientError>) {
        match songs {
            Ok(songs) => {
                self.catalog = Catalog::new(songs);
                debug!(
                    "Loaded {} songs by {} artists",
                    self.catalog.songs().len(),
                    self.catalog.artists().len()
                );
            }
            Err(e) => error!("Failed to load songs: {}", e),
        }
    }

    fn apply_ratings(&mut self, ratings: Result<UserRatings, ClientError>) {
        match ratings {
            Ok(ratings) => self.ratings = RatingBook::new(ratings),
            Err(e) => {
                debug!("No stored ratings: {}", e);
                self.ratings = RatingBook::default();
            }
        }
    }

    // ========== Recommendation form ==========

    pub fn select_artist(&mut self, artist: Option<String>) {
        self.form.select_artist(artist);
    }

    pub fn select_song(&mut self, title: Option<String>) -> Result<(), FormError> {
        self.form.select_song(title, &self.catalog)
    }

    pub fn select_genre(&mut self, genre: Option<Genre>) {
        self.form.select_genre(genre);
    }

    pub fn set_top_n(&mut self, value: u32) -> Result<(), FormError> {
        self.form.set_top_n(value)
    }

    pub fn song_options(&self) -> Vec<&Song> {
        self.form.song_options(&self.catalog)
    }

    /// Send the form; the response replaces the results
    ///
    /// Invalid input is returned without contacting the backend. Backend
    /// failures end up in `error()`.
    pub async fn submit_recommendation(&mut self) -> Result<(), FormError> {
        let pending = self.begin_recommendation()?;
        let result = self.api.recommend(&pending.request).await;
        self.finish_recommendation(pending, result);
        Ok(())
    }

    /// Validate the form and enter the loading state
    pub fn begin_recommendation(&mut self) -> Result<PendingRecommendation, FormError> {
        let request = self.form.to_request()?;

        self.error = None;
        self.results.clear();
        self.loading = true;
        self.submissions += 1;

        Ok(PendingRecommendation {
            request,
            ticket: self.submissions,
        })
    }

    /// Apply a recommend response; superseded submissions are ignored
    pub fn finish_recommendation(
        &mut self,
        pending: PendingRecommendation,
        result: Result<Vec<RecommendationItem>, ClientError>,
    ) {
        if pending.ticket != self.submissions {
            debug!("Dropping superseded recommendation response");
            return;
        }

        match result {
            Ok(items) => {
                debug!("Received {} recommendations", items.len());
                self.results = items;
                self.show_results = true;
            }
            Err(e) => {
                warn!("Recommendation failed: {}", e);
                self.error = Some(e.user_message(SERVER_ERROR));
            }
        }

        self.loading = false;
    }

    // ========== Ratings ==========

    /// Rate a song; the local rating changes only once the backend acknowledges
    ///
    /// Returns whether the write was acknowledged. Backend failures are logged.
    pub async fn rate(&mut self, song_key: &str, value: u8) -> Result<bool, FormError> {
        let request = self.begin_rating(song_key, value)?;
        let result = self.api.rate(&request).await;
        Ok(self.finish_rating(&request, result))
    }

    pub fn begin_rating(&self, song_key: &str, value: u8) -> Result<RateRequest, FormError> {
        let user = self.username().ok_or(FormError::NotLoggedIn)?.to_string();
        let rating = Rating::new(value).ok_or(FormError::RatingOutOfRange(value))?;

        Ok(RateRequest {
            user,
            song: song_key.to_string(),
            rating,
        })
    }

    pub fn finish_rating(&mut self, request: &RateRequest, result: Result<(), ClientError>) -> bool {
        match result {
            Ok(()) => {
                if self.username() == Some(request.user.as_str()) {
                    self.ratings.record(&request.song, request.rating);
                }
                true
            }
            Err(e) => {
                error!("Failed to rate {}: {}", request.song, e);
                false
            }
        }
    }
}
