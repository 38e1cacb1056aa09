//! Rating route

use actix_web::{post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use super::{form_error, SharedApp};
use crate::client::MusicApi;

#[derive(Debug, Deserialize)]
pub struct RateBody {
    pub song: String,
    pub rating: u8,
}

#[derive(Debug, Serialize)]
pub struct RateResponse {
    pub song: String,
    pub acknowledged: bool,
    /// Rating held locally after the write
    pub rating: Option<u8>,
}

/// Rate a song by its "title - artist" key
#[post("/rate")]
pub async fn rate(state: web::Data<SharedApp>, body: web::Json<RateBody>) -> impl Responder {
    let (api, request) = {
        let app = state.lock().await;
        match app.begin_rating(&body.song, body.rating) {
            Ok(request) => (app.api(), request),
            Err(e) => return form_error(e),
        }
    };

    let result = api.rate(&request).await;

    let mut app = state.lock().await;
    let acknowledged = app.finish_rating(&request, result);
    HttpResponse::Ok().json(RateResponse {
        rating: app.ratings().get(&request.song).map(|r| r.get()),
        song: request.song,
        acknowledged,
    })
}

/// Configure rating routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(rate);
}
