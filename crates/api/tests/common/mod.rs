#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use acfruit_api::config::{AdminCredentials, ServerConfig};
use acfruit_api::router::build_app_router;
use acfruit_api::state::AppState;
use acfruit_db::{MemoryClient, SupabaseConfig};
use acfruit_store::Stores;

pub const ADMIN_EMAIL: &str = "admin@acfruit.com";
pub const ADMIN_PASSWORD: &str = "admin123";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        supabase: SupabaseConfig {
            url: "http://storage.local".to_string(),
            anon_key: "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.test".to_string(),
        },
        admin: AdminCredentials::new(ADMIN_EMAIL, ADMIN_PASSWORD).expect("hashing should succeed"),
    }
}

/// A running app over an in-memory backend.
pub struct TestApp {
    pub router: Router,
    pub db: Arc<MemoryClient>,
    pub stores: Arc<Stores>,
}

impl TestApp {
    /// Build the full application router over `db`, after the initial load.
    pub async fn with_db(db: Arc<MemoryClient>) -> Self {
        let stores = Arc::new(Stores::new(db.clone(), db.clone()));
        stores.load_all().await;
        let state = AppState::new(stores.clone(), db.clone(), test_config());
        Self {
            router: build_app_router(state),
            db,
            stores,
        }
    }

    pub async fn new() -> Self {
        Self::with_db(Arc::new(MemoryClient::new())).await
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(request(Method::GET, uri, None, None)).await
    }

    pub async fn get_auth(&self, uri: &str, session: &str) -> Response<Body> {
        self.send(request(Method::GET, uri, None, Some(session))).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> Response<Body> {
        self.send(request(Method::POST, uri, Some(body), None)).await
    }

    pub async fn post_json_auth(&self, uri: &str, body: Value, session: &str) -> Response<Body> {
        self.send(request(Method::POST, uri, Some(body), Some(session))).await
    }

    pub async fn put_json_auth(&self, uri: &str, body: Value, session: &str) -> Response<Body> {
        self.send(request(Method::PUT, uri, Some(body), Some(session))).await
    }

    pub async fn delete_auth(&self, uri: &str, session: &str) -> Response<Body> {
        self.send(request(Method::DELETE, uri, None, Some(session))).await
    }

    /// Log in with the test credentials and return the session id.
    pub async fn login(&self) -> String {
        let response = self
            .post_json(
                "/api/v1/admin/login",
                serde_json::json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        json["data"]["sessionId"].as_str().unwrap().to_string()
    }
}

pub fn request(method: Method, uri: &str, body: Option<Value>, session: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(session) = session {
        builder = builder.header("authorization", format!("Bearer {session}"));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Build a single-file `multipart/form-data` request.
pub fn multipart_request(
    uri: &str,
    session: &str,
    file_name: &str,
    content_type: &str,
    bytes: &[u8],
) -> Request<Body> {
    let boundary = "acfruit-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("authorization", format!("Bearer {session}"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
