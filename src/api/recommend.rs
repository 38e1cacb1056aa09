//! Recommendation form and results routes

use actix_web::{get, post, put, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use super::{form_error, require_session, SharedApp};
use crate::client::MusicApi;
use crate::core::form::parse_genre;
use crate::core::{App, FormError, RecommendForm};
use crate::models::{Genre, Song};

/// Partial update of the form; absent fields are left alone, empty strings clear
#[derive(Debug, Default, Deserialize)]
pub struct FormUpdate {
    pub artist: Option<String>,
    pub song: Option<String>,
    pub genre: Option<String>,
    pub top_n: Option<u32>,
}

/// The form plus the options it can currently take
#[derive(Debug, Serialize)]
pub struct FormView<'a> {
    pub form: &'a RecommendForm,
    pub artists: &'a [String],
    pub songs: Vec<&'a Song>,
    pub genres: [Genre; 11],
}

impl<'a> FormView<'a> {
    fn new(app: &'a App) -> Self {
        Self {
            form: app.form(),
            artists: app.catalog().artists(),
            songs: app.song_options(),
            genres: Genre::ALL,
        }
    }
}

fn apply_update(app: &mut App, update: FormUpdate) -> Result<(), FormError> {
    // artist first so a song in the same update is checked against it
    if let Some(artist) = update.artist {
        app.select_artist(Some(artist));
    }
    if let Some(song) = update.song {
        app.select_song(Some(song))?;
    }
    if let Some(genre) = update.genre {
        let genre = match genre.trim() {
            "" => None,
            name => Some(parse_genre(name)?),
        };
        app.select_genre(genre);
    }
    if let Some(top_n) = update.top_n {
        app.set_top_n(top_n)?;
    }
    Ok(())
}

#[get("/form")]
pub async fn get_form(app: web::Data<SharedApp>) -> impl Responder {
    let app = app.lock().await;
    if let Err(resp) = require_session(&app) {
        return resp;
    }

    HttpResponse::Ok().json(FormView::new(&app))
}

#[put("/form")]
pub async fn update_form(
    app: web::Data<SharedApp>,
    body: web::Json<FormUpdate>,
) -> impl Responder {
    let mut app = app.lock().await;
    if let Err(resp) = require_session(&app) {
        return resp;
    }

    match apply_update(&mut app, body.into_inner()) {
        Ok(()) => HttpResponse::Ok().json(FormView::new(&app)),
        Err(e) => form_error(e),
    }
}

/// Submit the form; the results view carries any backend error
///
/// The state is unlocked while the backend works, so `/results` reports
/// `loading` in the meantime.
#[post("/recommend")]
pub async fn recommend(state: web::Data<SharedApp>) -> impl Responder {
    let (api, pending) = {
        let mut app = state.lock().await;
        match app.begin_recommendation() {
            Ok(pending) => (app.api(), pending),
            Err(e) => return form_error(e),
        }
    };

    let result = api.recommend(&pending.request).await;

    let mut app = state.lock().await;
    app.finish_recommendation(pending, result);
    HttpResponse::Ok().json(app.results_view())
}

#[get("/results")]
pub async fn get_results(app: web::Data<SharedApp>) -> impl Responder {
    let app = app.lock().await;
    if let Err(resp) = require_session(&app) {
        return resp;
    }

    HttpResponse::Ok().json(app.results_view())
}

/// Configure recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_form)
        .service(update_form)
        .service(recommend)
        .service(get_results);
}
