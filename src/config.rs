//! Runtime configuration for the Alpha Vantage client.
//!
//! The API key, endpoint, and timeout are injected at startup instead of
//! being baked into the fetch logic, so tests can point the client at a local
//! server.

use std::fmt;
use std::time::Duration;

use crate::constants::{
    API_BASE_URL, DEFAULT_TIMEOUT_SECS, ENV_API_KEY, ENV_BASE_URL, ENV_TIMEOUT_SECS,
};
use crate::error::{DashboardError, Result};

/// Credentials and transport settings for [`AlphaVantageClient`](crate::client::AlphaVantageClient).
#[derive(Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Alpha Vantage API key, sent as the `apikey` query parameter.
    pub api_key: String,
    /// Base URL for REST requests (defaults to [`API_BASE_URL`]).
    pub base_url: String,
    /// Upper bound on each upstream request.
    pub timeout: Duration,
}

impl DashboardConfig {
    /// Configuration for the public endpoint with the default timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: API_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Point at a custom base URL (sandbox or mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read configuration from the process environment.
    ///
    /// | Variable | Required | Default |
    /// |---|---|---|
    /// | `ALPHAVANTAGE_API_KEY` | yes | — |
    /// | `ALPHAVANTAGE_BASE_URL` | no | `https://www.alphavantage.co` |
    /// | `ALPHAVANTAGE_TIMEOUT_SECS` | no | `30` |
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(ENV_API_KEY)
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| DashboardError::Config(format!("{ENV_API_KEY} is not set")))?;

        let mut config = Self::new(api_key);
        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|u| !u.trim().is_empty()) {
            config.base_url = base_url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = raw.trim().parse::<u64>().map_err(|e| {
                DashboardError::Config(format!("{ENV_TIMEOUT_SECS}={raw:?}: {e}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

// Keeps the key out of `{:?}` output and therefore out of logs.
impl fmt::Debug for DashboardConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
