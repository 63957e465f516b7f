//! HTTP client for the dashboard server
//!
//! Endpoints:
//! - `GET /data`: current snapshot
//! - `POST /symbols`: replace the watchlist
//! - `POST /config`: replace the macro proxy symbols
//! - `POST /cache/reset`: drop the server's quote cache

use super::settings::{normalize_symbols, MacroConfig};
use super::{ClientError, SnapshotSource};
use crate::snapshot::ReceivedSnapshot;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use std::time::{Duration, Instant};

/// Default server address
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Connection settings for [`DashboardClient`]
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Base URL, without trailing slash
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Client for the dashboard server's JSON API
pub struct DashboardClient {
    config: DashboardConfig,
    client: Client,
}

impl DashboardClient {
    /// Create a client with the default configuration
    pub fn new() -> Result<Self, ClientError> {
        Self::with_config(DashboardConfig::default())
    }

    pub fn with_config(mut config: DashboardConfig) -> Result<Self, ClientError> {
        let trimmed = config.base_url.trim_end_matches('/').len();
        config.base_url.truncate(trimmed);

        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Fetch the current snapshot
    pub async fn fetch_data(&self) -> Result<ReceivedSnapshot, ClientError> {
        let url = self.url("/data");
        tracing::debug!(url = %url, "Fetching snapshot");

        let started = Instant::now();
        let response = self.client.get(&url).send().await?;
        let response = check_status(response).await?;
        let body = response.bytes().await?;
        let snapshot = ReceivedSnapshot::from_slice(&body)?;

        tracing::debug!(
            bytes = body.len(),
            tickers = snapshot.instruments().len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Snapshot received"
        );
        Ok(snapshot)
    }

    /// Replace the server's watchlist
    ///
    /// Symbols are normalized first; an empty list is rejected without a request.
    pub async fn update_symbols<I, S>(&self, symbols: I) -> Result<Vec<String>, ClientError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let symbols = normalize_symbols(symbols)?;
        self.post_json("/symbols", &symbols).await?;
        tracing::info!(count = symbols.len(), "Watchlist updated");
        Ok(symbols)
    }

    /// Replace the macro proxy symbols
    pub async fn update_macros(&self, config: &MacroConfig) -> Result<MacroConfig, ClientError> {
        let config = config.normalized();
        self.post_json("/config", &config).await?;
        tracing::info!(
            market = %config.market,
            volatility = %config.volatility,
            bonds = %config.bonds,
            dollar = %config.dollar,
            "Macro config updated"
        );
        Ok(config)
    }

    /// Ask the server to drop its cached quotes
    pub async fn reset_cache(&self) -> Result<(), ClientError> {
        let url = self.url("/cache/reset");
        tracing::debug!(url = %url, "Resetting server cache");
        let response = self.client.post(&url).send().await?;
        check_status(response).await?;
        Ok(())
    }

    async fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<(), ClientError> {
        let url = self.url(path);
        tracing::debug!(url = %url, "Posting settings");
        let response = self.client.post(&url).json(body).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl SnapshotSource for DashboardClient {
    async fn fetch_snapshot(&self) -> Result<ReceivedSnapshot, ClientError> {
        self.fetch_data().await
    }
}
