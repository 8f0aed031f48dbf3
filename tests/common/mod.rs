#![allow(dead_code)]

use activities_board::database::schema;
use activities_board::web;
use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tower::ServiceExt;

/// Single-connection in-memory database with the seeded catalog.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    schema::ensure_schema(&pool).await.expect("schema");
    schema::seed_activities_if_empty(&pool).await.expect("seed");
    pool
}

/// File-backed database with several connections, for contention tests.
pub async fn file_pool(dir: &tempfile::TempDir) -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(dir.path().join("activities.db"))
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await
        .expect("file sqlite");
    schema::ensure_schema(&pool).await.expect("schema");
    schema::seed_activities_if_empty(&pool).await.expect("seed");
    pool
}

pub async fn test_app() -> (Router, SqlitePool) {
    let pool = test_pool().await;
    (web::router(pool.clone(), "assets"), pool)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("json body")
    }

    pub fn location(&self) -> &str {
        self.headers
            .get("location")
            .and_then(|v| v.to_str().ok())
            .expect("location header")
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.expect("router response");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    TestResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    let request = Request::get(uri).body(Body::empty()).expect("request");
    send(app, request).await
}

pub async fn post(app: &Router, uri: &str) -> TestResponse {
    let request = Request::post(uri).body(Body::empty()).expect("request");
    send(app, request).await
}

pub async fn post_form(app: &Router, uri: &str, form: &[(&str, &str)]) -> TestResponse {
    let body = serde_urlencoded::to_string(form).expect("form");
    let request = Request::post(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .expect("request");
    send(app, request).await
}

pub async fn drop_tables(pool: &SqlitePool) {
    sqlx::query("DROP TABLE activity_participants")
        .execute(pool)
        .await
        .expect("drop participants");
    sqlx::query("DROP TABLE activities")
        .execute(pool)
        .await
        .expect("drop activities");
}
