//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the real application router (same middleware stack as
//! production) on top of the per-test database provided by
//! `#[sqlx::test]`, and wraps the usual request/response plumbing.

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use cardfolio_api::auth::jwt::JwtConfig;
use cardfolio_api::config::ServerConfig;
use cardfolio_api::router::build_app_router;
use cardfolio_api::state::AppState;
use cardfolio_storage::{DynStorageProvider, LocalProvider};
use cardfolio_vision::{VisionClient, VisionConfig};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        public_base_url: "http://localhost:3000".to_string(),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router against the given pool.
///
/// The vision client points at a closed port (nothing in these tests
/// may reach the extraction service) and storage writes under the
/// system temp directory.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let vision = VisionClient::new(VisionConfig {
        api_url: "http://127.0.0.1:9".to_string(),
        api_key: "test-key".to_string(),
        model: "card-extract-1".to_string(),
        timeout_secs: 1,
    })
    .expect("vision client should build");

    let storage: DynStorageProvider = Arc::new(LocalProvider::new(
        std::env::temp_dir().join("cardfolio-test-media"),
        "http://localhost:3000/media".to_string(),
    ));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        vision,
        storage,
    };

    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should run")
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should run")
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should run")
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should run")
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should run")
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should run")
}

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Register a user via the API and return `(access_token, user_id)`.
pub async fn register_user(app: Router, username: &str) -> (String, i64) {
    let body = serde_json::json!({
        "username": username,
        "email": format!("{username}@test.com"),
        "password": "test_password_123!",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let token = json["access_token"]
        .as_str()
        .expect("access_token should be a string")
        .to_string();
    let user_id = json["user"]["id"].as_i64().expect("user id should be set");
    (token, user_id)
}

/// Create a card through the API and return its JSON payload.
pub async fn create_card(app: Router, token: &str, slug: &str) -> serde_json::Value {
    let body = serde_json::json!({
        "slug": slug,
        "card_type": "personal",
        "fields": {
            "full_name": "Jane Doe",
            "company": "Acme",
            "email": "jane@acme.io"
        },
        "zones": [],
    });
    let response = post_json_auth(app, "/api/v1/business-cards", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}
