//! Popular songs route

use actix_web::{get, web, HttpResponse, Responder};

use super::{require_session, SharedApp};

#[get("/popular")]
pub async fn get_popular(app: web::Data<SharedApp>) -> impl Responder {
    let app = app.lock().await;
    if let Err(resp) = require_session(&app) {
        return resp;
    }

    HttpResponse::Ok().json(app.popular().visible())
}

/// Configure popular routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_popular);
}
