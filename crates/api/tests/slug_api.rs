//! HTTP-level integration tests for the slug check endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_card, get, register_user};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn valid_free_slug_is_available(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/slugs/check/jane-doe").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["slug"], "jane-doe");
    assert_eq!(json["valid"], true);
    assert_eq!(json["available"], true);
    assert!(json["suggestions"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn uppercase_input_is_normalized(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/slugs/check/Jane-Doe").await;
    let json = body_json(response).await;
    assert_eq!(json["slug"], "jane-doe");
    assert_eq!(json["valid"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn reserved_slug_is_invalid_with_suggestions(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/slugs/check/admin").await;
    let json = body_json(response).await;
    assert_eq!(json["valid"], false);
    assert_eq!(json["available"], false);
    assert!(json["reason"].is_string());

    let suggestions = json["suggestions"].as_array().unwrap();
    assert!(!suggestions.is_empty());
    assert!(suggestions.len() <= 8);
    // Derived candidates like "admin-card" are not themselves reserved.
    assert!(suggestions.contains(&serde_json::json!("admin-card")));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn all_digit_slug_is_invalid(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/slugs/check/12345").await;
    let json = body_json(response).await;
    assert_eq!(json["valid"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn taken_slug_offers_alternatives(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_user(app.clone(), "jane").await;
    create_card(app.clone(), &token, "jane-doe").await;

    let response = get(app, "/api/v1/slugs/check/jane-doe").await;
    let json = body_json(response).await;
    assert_eq!(json["valid"], true);
    assert_eq!(json["available"], false);

    let suggestions: Vec<String> = json["suggestions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s.as_str().unwrap().to_string())
        .collect();
    assert!(!suggestions.is_empty());
    assert!(suggestions.len() <= 8);
    // The taken slug itself must not be suggested.
    assert!(!suggestions.contains(&"jane-doe".to_string()));
}
