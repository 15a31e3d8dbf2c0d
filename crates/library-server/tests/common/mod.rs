//! Common test utilities: a server bound to an ephemeral port.

use std::net::SocketAddr;

use library_server::{ServerConfig, serve};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub const API_KEY: &str = "integration-api-key";
pub const JWT_SECRET: &str = "integration-jwt-secret";
pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "password123";

/// Test-profile configuration with fixed secrets.
#[allow(dead_code)]
pub fn test_config() -> ServerConfig {
    config_with(&[])
}

/// Test-profile configuration with extra variables layered on top.
#[allow(dead_code)]
pub fn config_with(extra: &[(&str, &str)]) -> ServerConfig {
    let extra: Vec<(String, String)> = extra
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    ServerConfig::from_lookup(|name| {
        if let Some((_, v)) = extra.iter().find(|(k, _)| k == name) {
            return Some(v.clone());
        }
        match name {
            "API_KEY" => Some(API_KEY.to_string()),
            "JWT_SECRET_KEY" => Some(JWT_SECRET.to_string()),
            "APP_ENV" => Some("test".to_string()),
            "HOST" => Some("127.0.0.1".to_string()),
            _ => None,
        }
    })
    .expect("test configuration is valid")
}

/// A running server plus an HTTP client pointed at it.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct LiveServer {
    pub addr: SocketAddr,
    pub client: Client,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<std::io::Result<()>>>,
}

#[allow(dead_code)]
impl LiveServer {
    /// Start a freshly seeded server with the default test configuration.
    pub async fn start() -> Self {
        Self::start_with(test_config()).await
    }

    /// Start a freshly seeded server with `config`.
    pub async fn start_with(config: ServerConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("listener has an address");

        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(serve(listener, config, async {
            let _ = rx.await;
        }));

        Self {
            addr,
            client: Client::new(),
            shutdown: Some(tx),
            handle: Some(handle),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path))
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(self.url(path))
    }

    /// Log in and return the raw token response.
    pub async fn login(&self, username: &str, password: &str) -> (reqwest::StatusCode, Value) {
        let response = self
            .post("/auth/login")
            .json(&serde_json::json!({"username": username, "password": password}))
            .send()
            .await
            .expect("login request");
        let status = response.status();
        (status, response.json().await.expect("login body is JSON"))
    }

    /// Log in as the admin and return the access token.
    pub async fn admin_token(&self) -> String {
        let (status, body) = self.login(ADMIN_USER, ADMIN_PASSWORD).await;
        assert_eq!(status, reqwest::StatusCode::OK, "admin login failed: {}", body);
        body["access_token"]
            .as_str()
            .expect("access_token present")
            .to_string()
    }

    /// Stop the server and wait for it to drain.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle
                .await
                .expect("server task panicked")
                .expect("server exited cleanly");
        }
    }
}

impl Drop for LiveServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}
