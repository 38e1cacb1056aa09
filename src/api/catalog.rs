//! Catalog routes: artists and songs used by the recommendation form

use actix_web::{get, web, HttpResponse, Responder};
use serde::Deserialize;

use super::{require_session, SharedApp};

#[derive(Debug, Deserialize)]
pub struct SongsQuery {
    pub artist: Option<String>,
}

/// Unique artists of the catalog
#[get("/artists")]
pub async fn get_artists(app: web::Data<SharedApp>) -> impl Responder {
    let app = app.lock().await;
    if let Err(resp) = require_session(&app) {
        return resp;
    }

    HttpResponse::Ok().json(app.catalog().artists())
}

/// All songs, or only the songs of `artist`
#[get("/songs")]
pub async fn get_songs(
    app: web::Data<SharedApp>,
    query: web::Query<SongsQuery>,
) -> impl Responder {
    let app = app.lock().await;
    if let Err(resp) = require_session(&app) {
        return resp;
    }

    let songs: Vec<_> = match query.artist.as_deref() {
        Some(artist) => app.catalog().songs_by(artist).collect(),
        None => app.catalog().songs().iter().collect(),
    };

    HttpResponse::Ok().json(songs)
}

/// Configure catalog routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_artists).service(get_songs);
}
