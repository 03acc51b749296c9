//! Core HTTP client for the Alpha Vantage REST API.
//!
//! The [`AlphaVantageClient`] struct is the entry point for fetching market
//! data. It wraps [`reqwest::Client`] with the configured timeout and API key
//! and provides a typed `get_query` method.
//!
//! API endpoint methods are added to `AlphaVantageClient` via `impl` blocks in
//! the [`crate::api`] module.

use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::DashboardConfig;
use crate::constants::QUERY_PATH;
use crate::error::{DashboardError, Result};

/// Core HTTP client for the Alpha Vantage REST API.
///
/// Every request goes to `{base_url}/query` with the function parameters plus
/// `apikey`. The key is appended per request and never logged.
///
/// # Example
///
/// ```no_run
/// use stock_dashboard::{AlphaVantageClient, DashboardConfig};
///
/// # #[tokio::main]
/// # async fn main() -> stock_dashboard::Result<()> {
/// let client = AlphaVantageClient::new(DashboardConfig::new("your-api-key"))?;
/// let series = client.get_daily_series("IBM").await?;
/// println!("{} bars", series.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    http: reqwest::Client,
    api_key: String,
    /// Fully-resolved `{base_url}/query` endpoint.
    query_url: Url,
}

impl AlphaVantageClient {
    /// Create a client from an explicit configuration.
    ///
    /// Fails on a blank API key or an unparsable base URL.
    pub fn new(config: DashboardConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(DashboardError::Config("API key is empty".into()));
        }

        let base_url = config.base_url.trim_end_matches('/');
        let query_url = Url::parse(&format!("{base_url}{QUERY_PATH}"))?;

        let http = reqwest::Client::builder()
            .default_headers(Self::default_headers())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        tracing::debug!(%query_url, timeout = ?config.timeout, "alpha vantage client ready");

        Ok(Self {
            http,
            api_key: config.api_key,
            query_url,
        })
    }

    /// Create a client from `ALPHAVANTAGE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(DashboardConfig::from_env()?)
    }

    /// Returns a reference to the underlying `reqwest::Client`.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Returns the query endpoint requests are sent to.
    pub fn query_url(&self) -> &Url {
        &self.query_url
    }

    // -----------------------------------------------------------------------
    // Generic HTTP helpers
    // -----------------------------------------------------------------------

    /// Perform a GET on the query endpoint and deserialize the JSON response.
    ///
    /// `params` are sent in order, followed by `apikey`.
    pub async fn get_query<R: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<R> {
        tracing::debug!(url = %self.query_url, ?params, "GET");

        let resp = self
            .http
            .get(self.query_url.clone())
            .query(params)
            .query(&[("apikey", self.api_key.as_str())])
            .send()
            .await?;

        self.handle_response(resp).await
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    /// Default headers applied to every request.
    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Read a response, returning either the deserialized body or a `DashboardError`.
    async fn handle_response<R: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<R> {
        let status = resp.status();
        let bytes = resp.bytes().await?;

        if status.is_success() {
            serde_json::from_slice(&bytes).map_err(DashboardError::Json)
        } else {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            tracing::debug!(%status, "upstream returned error status");
            Err(DashboardError::HttpStatus { status, body })
        }
    }
}
