#![allow(dead_code)]
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use serde_json::Value;
use signoutsync_backend::{
    app,
    config::Config,
    models::account::Account,
    repositories::InMemoryAccountStore,
    state::AppState,
};
use tower::ServiceExt;

pub const TEST_AGENT: &str = "signoutsync-tests/1.0";

pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "TESTUSER_PASSWORD" => Some("test-password".to_string()),
        _ => None,
    })
    .expect("test config")
}

pub fn test_state() -> AppState {
    let store = InMemoryAccountStore::with_accounts([
        Account::new("alice", "wonderland"),
        Account::new("bob", "builder"),
    ]);
    AppState::new(Arc::new(store), test_config())
}

pub fn test_app() -> (Router, AppState) {
    let state = test_state();
    (app(state.clone()), state)
}

pub fn json_request(uri: &str, body: Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::USER_AGENT, TEST_AGENT);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// `name=value` pair from the response's Set-Cookie header.
pub fn session_cookie(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("set-cookie header")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

pub async fn login(app: &Router, username: &str, password: &str, device: &str) -> (Value, String) {
    let response = send(
        app,
        json_request(
            "/login",
            serde_json::json!({
                "username": username,
                "password": password,
                "device_name": device,
            }),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let cookie = session_cookie(&response);
    (body_json(response).await, cookie)
}
