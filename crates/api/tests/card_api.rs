//! HTTP-level integration tests for business cards: create, update,
//! slug swap, version history, public resolve, and analytics.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_card, delete_auth, get, get_auth, post_json_auth, put_json_auth,
    register_user,
};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn create_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = common::post_json(
        app,
        "/api/v1/business-cards",
        serde_json::json!({ "slug": "jane-doe" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_card_claims_slug_and_snapshots(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, user_id) = register_user(app.clone(), "jane").await;

    let card = create_card(app.clone(), &token, "jane-doe").await;
    assert_eq!(card["slug"], "jane-doe");
    assert_eq!(card["owner_id"], user_id);
    assert_eq!(card["view_count"], 0);
    assert_eq!(card["share_url"], "http://localhost:3000/c/jane-doe");

    // Version 1 exists from the moment of creation.
    let card_id = card["id"].as_i64().unwrap();
    let response = get_auth(
        app,
        &format!("/api/v1/business-cards/{card_id}/versions"),
        &token,
    )
    .await;
    let json = body_json(response).await;
    let versions = json["data"].as_array().unwrap();
    assert_eq!(versions.len(), 1);
    assert_eq!(versions[0]["version_number"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_rejects_invalid_slug(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_user(app.clone(), "jane").await;

    for slug in ["ab", "admin", "-jane", "jane--doe", "12345", "jane doe"] {
        let response = post_json_auth(
            app.clone(),
            "/api/v1/business-cards",
            &token,
            serde_json::json!({ "slug": slug }),
        )
        .await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "slug {slug:?} must be rejected"
        );
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_with_taken_slug_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_user(app.clone(), "jane").await;
    create_card(app.clone(), &token, "jane-doe").await;

    let (other_token, _) = register_user(app.clone(), "john").await;
    let response = post_json_auth(
        app,
        "/api/v1/business-cards",
        &other_token,
        serde_json::json!({ "slug": "jane-doe" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_swaps_slug_and_appends_version(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_user(app.clone(), "jane").await;
    let card = create_card(app.clone(), &token, "jane-doe").await;
    let card_id = card["id"].as_i64().unwrap();

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/business-cards/{card_id}"),
        &token,
        serde_json::json!({ "slug": "jane-acme" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["slug"], "jane-acme");

    // The old slug no longer resolves; the new one does.
    let response = get(app.clone(), "/api/v1/cards/jane-doe").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = get(app.clone(), "/api/v1/cards/jane-acme").await;
    assert_eq!(response.status(), StatusCode::OK);

    // Two versions now: create + update.
    let response = get_auth(
        app.clone(),
        &format!("/api/v1/business-cards/{card_id}/versions"),
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    // The freed slug can be claimed by someone else afterwards.
    let (other_token, _) = register_user(app.clone(), "john").await;
    let response = post_json_auth(
        app,
        "/api/v1/business-cards",
        &other_token,
        serde_json::json!({ "slug": "jane-doe" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_field_edit_replaces_contact_columns(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_user(app.clone(), "jane").await;
    let card = create_card(app.clone(), &token, "jane-doe").await;
    let card_id = card["id"].as_i64().unwrap();

    let response = put_json_auth(
        app,
        &format!("/api/v1/business-cards/{card_id}"),
        &token,
        serde_json::json!({
            "fields": { "full_name": "Jane A. Doe", "phone": "+1 555 0100" }
        }),
    )
    .await;
    let updated = body_json(response).await;
    assert_eq!(updated["full_name"], "Jane A. Doe");
    assert_eq!(updated["phone"], "+1 555 0100");
    // Wholesale replacement: the old company is gone.
    assert_eq!(updated["company"], serde_json::Value::Null);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn cards_are_owner_scoped(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_user(app.clone(), "jane").await;
    let card = create_card(app.clone(), &token, "jane-doe").await;
    let card_id = card["id"].as_i64().unwrap();

    let (other_token, _) = register_user(app.clone(), "john").await;
    let response = get_auth(
        app.clone(),
        &format!("/api/v1/business-cards/{card_id}"),
        &other_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(
        app,
        &format!("/api/v1/business-cards/{card_id}"),
        &other_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn public_resolve_counts_views(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_user(app.clone(), "jane").await;
    let card = create_card(app.clone(), &token, "jane-doe").await;
    let card_id = card["id"].as_i64().unwrap();

    // Anonymous resolves, twice.
    for _ in 0..2 {
        let response = get(app.clone(), "/api/v1/cards/jane-doe").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = get(app.clone(), "/api/v1/cards/jane-doe").await;
    let json = body_json(response).await;
    assert_eq!(json["fields"]["full_name"], "Jane Doe");
    assert_eq!(json["share_url"], "http://localhost:3000/c/jane-doe");
    // Owner identity is not exposed publicly.
    assert!(json.get("owner_id").is_none());

    let response = get_auth(
        app,
        &format!("/api/v1/business-cards/{card_id}/analytics"),
        &token,
    )
    .await;
    let summary = body_json(response).await;
    assert_eq!(summary["total_views"], 3);
    let events = summary["events"].as_array().unwrap();
    let views = events
        .iter()
        .find(|e| e["event_type"] == "view")
        .expect("view events recorded");
    assert_eq!(views["count"], 3);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn private_card_does_not_resolve(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_user(app.clone(), "jane").await;
    let card = create_card(app.clone(), &token, "jane-doe").await;
    let card_id = card["id"].as_i64().unwrap();

    put_json_auth(
        app.clone(),
        &format!("/api/v1/business-cards/{card_id}"),
        &token,
        serde_json::json!({ "is_public": false }),
    )
    .await;

    let response = get(app, "/api/v1/cards/jane-doe").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn public_event_recording(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_user(app.clone(), "jane").await;
    let card = create_card(app.clone(), &token, "jane-doe").await;
    let card_id = card["id"].as_i64().unwrap();

    let response = common::post_json(
        app.clone(),
        "/api/v1/cards/jane-doe/events",
        serde_json::json!({ "event_type": "qr_scan" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // view/wallet_save cannot be posted directly.
    let response = common::post_json(
        app.clone(),
        "/api/v1/cards/jane-doe/events",
        serde_json::json!({ "event_type": "view" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get_auth(
        app,
        &format!("/api/v1/business-cards/{card_id}/analytics"),
        &token,
    )
    .await;
    let summary = body_json(response).await;
    let events = summary["events"].as_array().unwrap();
    let scans = events
        .iter()
        .find(|e| e["event_type"] == "qr_scan")
        .expect("qr_scan recorded");
    assert_eq!(scans["count"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn extract_is_bad_gateway_when_vision_unreachable(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_user(app.clone(), "jane").await;

    // Front side only; the test vision client points at a closed port,
    // so the single submitted side fails and the request is a 502.
    let boundary = "test-boundary-9c41";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"front\"; filename=\"front.png\"\r\n\
             Content-Type: image/png\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"\x89PNG\r\n\x1a\n"); // PNG magic satisfies the sniffer
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/v1/business-cards/extract")
        .header("authorization", format!("Bearer {token}"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(axum::body::Body::from(body))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn extract_requires_front_image(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = register_user(app.clone(), "jane").await;

    // Multipart body without the required 'front' field.
    let boundary = "test-boundary-7f2a";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"notes\"\r\n\r\n\
         hello\r\n\
         --{boundary}--\r\n"
    );
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/v1/business-cards/extract")
        .header("authorization", format!("Bearer {token}"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(axum::body::Body::from(body))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
