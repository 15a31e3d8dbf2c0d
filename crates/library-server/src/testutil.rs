//! Helpers for router-level tests.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use chrono::{DateTime, Duration, Utc};
use library_store::BookRegistry;
use serde_json::Value;
use tower::ServiceExt;

use crate::config::ServerConfig;
use crate::routes::build_router;
use crate::state::AppState;

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_SECRET: &str = "test-jwt-secret";

/// Configuration for the test profile with fixed secrets.
pub fn test_config() -> ServerConfig {
    ServerConfig::from_lookup(|name| match name {
        "API_KEY" => Some(TEST_API_KEY.to_string()),
        "JWT_SECRET_KEY" => Some(TEST_SECRET.to_string()),
        "APP_ENV" => Some("test".to_string()),
        _ => None,
    })
    .expect("test configuration is valid")
}

/// A seeded application driven in-process through `oneshot`.
pub struct TestApp {
    pub state: AppState,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: ServerConfig) -> Self {
        let state = AppState::new(BookRegistry::seeded(), config);
        let router = build_router(state.clone());
        Self { state, router }
    }

    /// Sign a token with the app's keys.
    pub fn token_for(&self, username: &str, issued: DateTime<Utc>, lifetime: Duration) -> String {
        self.state
            .keys()
            .issue(username, issued, lifetime)
            .expect("token signs")
    }

    pub async fn get(&self, uri: &str, headers: &[(&str, String)]) -> (StatusCode, Value) {
        let (status, bytes) = self.send(Method::GET, uri, headers, None, Body::empty()).await;
        (status, parse_json(&bytes))
    }

    pub async fn get_text(&self, uri: &str, headers: &[(&str, String)]) -> (StatusCode, String) {
        let (status, bytes) = self.send(Method::GET, uri, headers, None, Body::empty()).await;
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    pub async fn post_json(
        &self,
        uri: &str,
        headers: &[(&str, String)],
        body: Value,
    ) -> (StatusCode, Value) {
        let (status, bytes) = self
            .send(
                Method::POST,
                uri,
                headers,
                Some("application/json"),
                Body::from(body.to_string()),
            )
            .await;
        (status, parse_json(&bytes))
    }

    pub async fn post_raw(
        &self,
        uri: &str,
        headers: &[(&str, String)],
        content_type: Option<&str>,
        body: &'static str,
    ) -> (StatusCode, Value) {
        let (status, bytes) = self
            .send(Method::POST, uri, headers, content_type, Body::from(body))
            .await;
        (status, parse_json(&bytes))
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        headers: &[(&str, String)],
        content_type: Option<&str>,
        body: Body,
    ) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, value.as_str());
        }
        if let Some(ct) = content_type {
            builder = builder.header(header::CONTENT_TYPE, ct);
        }
        let request = builder.body(body).expect("request builds");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        (status, bytes.to_vec())
    }
}

fn parse_json(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
