//! Session routes: login, registration, logout and screen state

use actix_web::{get, post, web, HttpResponse, Responder};

use super::SharedApp;
use crate::client::MusicApi;
use crate::core::{App, MainScreenData, Screen};
use crate::models::Credentials;

/// Current screen and session messages
#[get("/state")]
pub async fn get_state(app: web::Data<SharedApp>) -> impl Responder {
    let app = app.lock().await;
    HttpResponse::Ok().json(app.state())
}

/// login endpoint; a successful login also loads the main screen data
///
/// The state lock is released while the backend is called.
#[post("/login")]
pub async fn login(state: web::Data<SharedApp>, body: web::Json<Credentials>) -> impl Responder {
    let (api, credentials) = {
        let mut app = state.lock().await;
        if app.username().is_some() {
            return already_logged_in();
        }

        app.show_login();
        match app.begin_login(body.into_inner()) {
            Some(credentials) => (app.api(), credentials),
            None => return login_rejected(&app),
        }
    };

    let result = api.login(&credentials).await;

    let user = {
        let mut app = state.lock().await;
        if app.username().is_some() {
            return already_logged_in();
        }
        if let Err(e) = app.finish_login(&credentials, result) {
            tracing::error!("Failed to persist session: {}", e);
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to save session"
            }));
        }
        if app.screen() != Screen::Main {
            return login_rejected(&app);
        }
        credentials.username
    };

    let data = MainScreenData::fetch(api.as_ref(), &user).await;

    let mut app = state.lock().await;
    app.apply_main(&user, data);
    HttpResponse::Ok().json(app.state())
}

#[post("/register")]
pub async fn register(state: web::Data<SharedApp>, body: web::Json<Credentials>) -> impl Responder {
    let (api, credentials) = {
        let mut app = state.lock().await;
        if app.username().is_some() {
            return already_logged_in();
        }

        app.show_register();
        match app.begin_register(body.into_inner()) {
            Some(credentials) => (app.api(), credentials),
            None => return register_rejected(&app),
        }
    };

    let result = api.register(&credentials).await;

    let mut app = state.lock().await;
    app.finish_register(&credentials, result);
    if app.register_error().is_some() {
        return register_rejected(&app);
    }
    HttpResponse::Ok().json(app.state())
}

fn already_logged_in() -> HttpResponse {
    HttpResponse::Conflict().json(serde_json::json!({
        "error": "Already logged in"
    }))
}

fn login_rejected(app: &App) -> HttpResponse {
    HttpResponse::Unauthorized().json(serde_json::json!({
        "error": app.login_error().unwrap_or("Login failed")
    }))
}

fn register_rejected(app: &App) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({
        "error": app.register_error().unwrap_or("Registration failed")
    }))
}

#[post("/logout")]
pub async fn logout(app: web::Data<SharedApp>) -> impl Responder {
    let mut app = app.lock().await;
    match app.logout() {
        Ok(()) => HttpResponse::Ok().json(app.state()),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to clear session: {}", e)
        })),
    }
}

/// Configure session routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_state)
        .service(login)
        .service(register)
        .service(logout);
}
