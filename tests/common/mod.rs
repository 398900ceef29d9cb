use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use marquee::modules::users::User;
use marquee::modules::users::repository::InMemoryUserStore;
use marquee::router::init_router;
use marquee::state::AppState;
use marquee_config::{CookieConfig, CorsConfig, JwtConfig};
use marquee_core::hash_password;
use tower::ServiceExt;

pub const ADA_ID: i32 = 7;
pub const ADA_EMAIL: &str = "ada@example.com";
pub const ADA_PASSWORD: &str = "analytical-engine";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        issuer: "example.com".to_string(),
        audience: "example.com".to_string(),
        access_token_expiry: 900,
        refresh_token_expiry: 86400,
        cookie: CookieConfig {
            name: "_unsecure_Host-refresh_token".to_string(),
            path: "/".to_string(),
            domain: "localhost".to_string(),
        },
    }
}

pub fn seeded_store() -> Arc<InMemoryUserStore> {
    let store = InMemoryUserStore::new();
    let now = chrono::Utc::now().naive_utc();
    store
        .insert(User {
            id: ADA_ID,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: ADA_EMAIL.to_string(),
            password: hash_password(ADA_PASSWORD).unwrap(),
            created_at: now,
            updated_at: now,
        })
        .unwrap();
    Arc::new(store)
}

pub fn test_state(store: Arc<InMemoryUserStore>) -> AppState {
    AppState::new(
        test_jwt_config(),
        CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        store,
    )
}

#[allow(dead_code)]
pub fn setup_test_app() -> (Router, AppState, Arc<InMemoryUserStore>) {
    let store = seeded_store();
    let state = test_state(store.clone());
    (init_router(state.clone()), state, store)
}

#[allow(dead_code)]
pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// All `Set-Cookie` header values on a response.
#[allow(dead_code)]
pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}
