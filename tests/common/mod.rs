#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use bookmarks_api::app::app;
use bookmarks_api::config::AppConfig;
use bookmarks_api::database::MemoryStore;
use bookmarks_api::state::AppState;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
}

/// Development config with cheap bcrypt and request logging off
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.security.jwt_secret = TEST_JWT_SECRET.to_string();
    config.security.bcrypt_cost = 4;
    config.api.enable_request_logging = false;
    config
}

impl TestServer {
    /// Serve the router over a fresh in-memory store on an unused port.
    /// The server lives as long as the calling test's runtime.
    pub async fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let state = AppState::new(test_config(), Arc::new(MemoryStore::new()))?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app(state)).await {
                eprintln!("test server stopped: {e}");
            }
        });

        let server = Self {
            port,
            base_url,
            client: reqwest::Client::new(),
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn signup(&self, email: &str, password: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(self.url("/auth/signup"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?)
    }

    pub async fn signin(&self, email: &str, password: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(self.url("/auth/signin"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?)
    }

    /// Sign up `email` and return its access token
    pub async fn token_for(&self, email: &str) -> Result<String> {
        let res = self.signup(email, "pw1").await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "signup failed: {}", res.status());
        let body: Value = res.json().await?;
        body["access_token"]
            .as_str()
            .map(str::to_string)
            .context("signup response missing access_token")
    }

    pub async fn create_bookmark(&self, token: &str, title: &str, link: &str) -> Result<Value> {
        let res = self
            .client
            .post(self.url("/bookmarks"))
            .bearer_auth(token)
            .json(&json!({ "title": title, "link": link }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create failed: {}", res.status());
        Ok(res.json().await?)
    }
}
