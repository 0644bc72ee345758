//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, making authenticated HTTP
//! requests, and provisioning test accounts.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use gate_api::server::{create_app, create_app_state};
use gate_common::{AppConfig, API_KEY_HEADER};
use gate_service::SeedService;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    /// API key of the seeded admin account
    pub admin_key: String,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server against the configured database, seeded with
    /// the default admin and rule set
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let seed_config = config.seed.clone();

        // Create app state
        let state = create_app_state(config).await?;

        // Seed admin + default rules; idempotent across test runs
        let outcome = SeedService::new(state.service_context(), seed_config)
            .run()
            .await?;
        let admin_key = outcome.admin_api_key;

        // Build application
        let app = create_app(state);

        // Bind to an ephemeral port
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let actual_addr = listener.local_addr()?;

        // Spawn server task
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Wait for server to be ready
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Create HTTP client
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr: actual_addr,
            client,
            admin_key,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make an unauthenticated GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a GET request with an API key
    pub async fn get_keyed(&self, path: &str, api_key: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .get(&url)
            .header(API_KEY_HEADER, api_key)
            .send()
            .await?)
    }

    /// Make a POST request with an API key and JSON body
    pub async fn post_keyed<T: Serialize>(
        &self,
        path: &str,
        api_key: &str,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(body)
            .send()
            .await?)
    }

    /// Make a PATCH request with an API key and JSON body
    pub async fn patch_keyed<T: Serialize>(
        &self,
        path: &str,
        api_key: &str,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .patch(&url)
            .header(API_KEY_HEADER, api_key)
            .json(body)
            .send()
            .await?)
    }

    /// Make a PUT request with an API key and JSON body
    pub async fn put_keyed<T: Serialize>(
        &self,
        path: &str,
        api_key: &str,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .put(&url)
            .header(API_KEY_HEADER, api_key)
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request with an API key
    pub async fn delete_keyed(&self, path: &str, api_key: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .delete(&url)
            .header(API_KEY_HEADER, api_key)
            .send()
            .await?)
    }
}

/// Create a test configuration
pub fn test_config() -> Result<AppConfig> {
    // Load from environment or use defaults
    dotenvy::dotenv().ok();
    std::env::set_var("API_PORT", "0");

    let config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {e}"))?;

    Ok(config)
}

/// Helper to check if test environment is available
pub async fn check_test_env() -> bool {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
