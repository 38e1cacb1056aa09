//! Local web surface for songrec
//!
//! Exposes the client state as JSON under `/api` so a browser page can bind
//! to it. All handlers share one `App` behind an async mutex, which is never
//! held across a backend call.

pub mod auth;
pub mod catalog;
pub mod popular;
pub mod rating;
pub mod recommend;

use actix_web::{web, HttpResponse};

use crate::core::{App, FormError};

/// The single client state shared by all workers
pub type SharedApp = tokio::sync::Mutex<App>;

/// Configure all API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Session routes
            .configure(auth::configure)
            // Artist and song lookups
            .configure(catalog::configure)
            // Form, submission and results
            .configure(recommend::configure)
            // Ratings
            .configure(rating::configure)
            // Popular songs panel
            .configure(popular::configure),
    );
}

/// Reject requests that need a logged-in user
pub(crate) fn require_session(app: &App) -> Result<(), HttpResponse> {
    if app.username().is_some() {
        Ok(())
    } else {
        Err(form_error(FormError::NotLoggedIn))
    }
}

pub(crate) fn form_error(e: FormError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        FormError::NotLoggedIn => HttpResponse::Unauthorized().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{Call, MockApi};
    use crate::models::{PopularSong, RecommendationItem, Song};
    use crate::stores::SessionStore;
    use actix_web::{http::StatusCode, test, App as ActixApp};
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;

    fn shared(api: Arc<MockApi>, dir: &TempDir) -> web::Data<SharedApp> {
        let store = SessionStore::new(dir.path().join("session"));
        web::Data::new(tokio::sync::Mutex::new(App::restore(api, store)))
    }

    fn backend() -> MockApi {
        MockApi {
            songs: Ok(vec![
                Song::new("Hello", "Adele"),
                Song::new("Skyfall", "Adele"),
                Song::new("Yellow", "Coldplay"),
            ]),
            recommend: Ok(vec![RecommendationItem {
                title: "Someone Like You".into(),
                artist: "Adele".into(),
                score: Some(0.75),
                spotify_url: None,
            }]),
            popular: Ok((0..18)
                .map(|i| PopularSong {
                    name: format!("Hit {}", i),
                    artists: vec!["Various".into()],
                    image_url: None,
                    spotify_url: None,
                })
                .collect()),
            ..Default::default()
        }
    }

    #[actix_web::test]
    async fn test_requires_login() {
        let dir = TempDir::new().unwrap();
        let data = shared(Arc::new(backend()), &dir);
        let srv = test::init_service(ActixApp::new().app_data(data).configure(configure)).await;

        let req = test::TestRequest::get().uri("/api/artists").to_request();
        let resp = test::call_service(&srv, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get().uri("/api/state").to_request();
        let state: serde_json::Value = test::call_and_read_body_json(&srv, req).await;
        assert_eq!(state["screen"], "login");
        assert_eq!(state["user"], serde_json::Value::Null);
    }

    #[actix_web::test]
    async fn test_rejected_login_returns_server_message() {
        let dir = TempDir::new().unwrap();
        let api = MockApi {
            login: Err((401, r#"{"error": "User tidak ditemukan"}"#.into())),
            ..backend()
        };
        let data = shared(Arc::new(api), &dir);
        let srv = test::init_service(ActixApp::new().app_data(data).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/login")
            .set_json(serde_json::json!({"username": "dave", "password": "x"}))
            .to_request();
        let resp = test::call_service(&srv, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "User tidak ditemukan");
    }

    #[actix_web::test]
    async fn test_full_flow() {
        let dir = TempDir::new().unwrap();
        let api = Arc::new(backend());
        let data = shared(api.clone(), &dir);
        let srv = test::init_service(ActixApp::new().app_data(data).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/login")
            .set_json(serde_json::json!({"username": "alice", "password": "pw"}))
            .to_request();
        let state: serde_json::Value = test::call_and_read_body_json(&srv, req).await;
        assert_eq!(state["screen"], "main");
        assert_eq!(state["user"], "alice");

        let req = test::TestRequest::get()
            .uri("/api/songs?artist=Adele")
            .to_request();
        let songs: Vec<Song> = test::call_and_read_body_json(&srv, req).await;
        assert_eq!(songs.len(), 2);

        // a song by another artist is rejected
        let req = test::TestRequest::put()
            .uri("/api/form")
            .set_json(serde_json::json!({"artist": "Coldplay", "song": "Hello"}))
            .to_request();
        let resp = test::call_service(&srv, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::put()
            .uri("/api/form")
            .set_json(serde_json::json!({
                "artist": "Adele", "song": "Hello", "genre": "pop", "top_n": 10
            }))
            .to_request();
        let view: serde_json::Value = test::call_and_read_body_json(&srv, req).await;
        assert_eq!(view["form"]["song"], "Hello");
        assert_eq!(view["songs"].as_array().map(Vec::len), Some(2));

        let req = test::TestRequest::post().uri("/api/recommend").to_request();
        let results: serde_json::Value = test::call_and_read_body_json(&srv, req).await;
        assert_eq!(results["items"][0]["song_key"], "Someone Like You - Adele");
        assert_eq!(results["loading"], false);

        let req = test::TestRequest::post()
            .uri("/api/rate")
            .set_json(serde_json::json!({"song": "Someone Like You - Adele", "rating": 4}))
            .to_request();
        let rated: serde_json::Value = test::call_and_read_body_json(&srv, req).await;
        assert_eq!(rated["acknowledged"], true);
        assert_eq!(rated["rating"], 4);

        let req = test::TestRequest::get().uri("/api/results").to_request();
        let results: serde_json::Value = test::call_and_read_body_json(&srv, req).await;
        assert_eq!(results["items"][0]["rating"], 4);

        let req = test::TestRequest::get().uri("/api/popular").to_request();
        let popular: Vec<PopularSong> = test::call_and_read_body_json(&srv, req).await;
        assert_eq!(popular.len(), 15);

        assert!(api.calls().contains(&Call::Popular));
    }

    #[actix_web::test]
    async fn test_invalid_rating_is_bad_request() {
        let dir = TempDir::new().unwrap();
        SessionStore::new(dir.path().join("session"))
            .save(&crate::models::Session::new("alice"))
            .unwrap();
        let api = Arc::new(backend());
        let data = shared(api.clone(), &dir);
        let srv = test::init_service(ActixApp::new().app_data(data).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/rate")
            .set_json(serde_json::json!({"song": "Hello - Adele", "rating": 7}))
            .to_request();
        let resp = test::call_service(&srv, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(!api.calls().iter().any(|c| matches!(c, Call::Rate(_))));
    }

    #[actix_web::test]
    async fn test_results_show_loading_while_recommend_is_pending() {
        let dir = TempDir::new().unwrap();
        SessionStore::new(dir.path().join("session"))
            .save(&crate::models::Session::new("alice"))
            .unwrap();
        let api = Arc::new(MockApi {
            latency: Some(Duration::from_millis(300)),
            ..backend()
        });
        let data = shared(api, &dir);
        data.lock().await.activate().await;
        let srv = test::init_service(
            ActixApp::new()
                .app_data(data.clone())
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::put()
            .uri("/api/form")
            .set_json(serde_json::json!({"artist": "Adele", "song": "Hello", "genre": "pop"}))
            .to_request();
        let resp = test::call_service(&srv, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let submit = async {
            let req = test::TestRequest::post().uri("/api/recommend").to_request();
            let body: serde_json::Value = test::call_and_read_body_json(&srv, req).await;
            body
        };
        let during = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            let started = std::time::Instant::now();
            let req = test::TestRequest::get().uri("/api/results").to_request();
            let body: serde_json::Value = test::call_and_read_body_json(&srv, req).await;
            (body, started.elapsed())
        };
        let (done, (during, waited)) = tokio::join!(submit, during);

        assert_eq!(during["loading"], true);
        assert_eq!(during["items"].as_array().map(Vec::len), Some(0));
        assert!(waited < Duration::from_millis(200));

        assert_eq!(done["loading"], false);
        assert_eq!(done["items"][0]["song_key"], "Someone Like You - Adele");
    }
}
