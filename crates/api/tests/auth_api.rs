//! HTTP-level tests for the admin session gate.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{body_json, TestApp, ADMIN_EMAIL};

#[tokio::test]
async fn login_returns_a_session_id() {
    let app = TestApp::new().await;
    let response = app
        .post_json(
            "/api/v1/admin/login",
            json!({ "email": "Admin@ACFruit.com", "password": "admin123" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["sessionId"].is_string());
    assert_eq!(json["data"]["email"], ADMIN_EMAIL);
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = TestApp::new().await;
    let response = app
        .post_json(
            "/api/v1/admin/login",
            json!({ "email": ADMIN_EMAIL, "password": "admin124" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Invalid email or password");
}

#[tokio::test]
async fn dashboard_requires_a_session() {
    let app = TestApp::new().await;

    let response = app.get("/api/v1/admin/dashboard/news").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.get_auth("/api/v1/admin/dashboard/news", "not-a-session").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.get("/api/v1/calendar").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_ends_the_session() {
    let app = TestApp::new().await;
    let session = app.login().await;

    let response = app.get_auth("/api/v1/admin/session", &session).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["email"], ADMIN_EMAIL);

    let response = app
        .post_json_auth("/api/v1/admin/logout", json!({}), &session)
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.get_auth("/api/v1/admin/session", &session).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
