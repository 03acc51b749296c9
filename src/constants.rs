//! Constants for the Alpha Vantage daily time series API and the dashboard.
//!
//! Contains the base URL, query values, environment variable names, and the
//! defaults used by [`DashboardConfig`](crate::config::DashboardConfig) and
//! [`DashboardRequest`](crate::dashboard::DashboardRequest).

// ---------------------------------------------------------------------------
// Base URLs
// ---------------------------------------------------------------------------

/// Base URL for the Alpha Vantage REST API.
pub const API_BASE_URL: &str = "https://www.alphavantage.co";

/// Path of the single query endpoint every Alpha Vantage function goes through.
pub const QUERY_PATH: &str = "/query";

// ---------------------------------------------------------------------------
// Query values
// ---------------------------------------------------------------------------

/// `function` parameter for the daily (unadjusted) OHLCV series.
pub const FUNCTION_TIME_SERIES_DAILY: &str = "TIME_SERIES_DAILY";

/// `outputsize` value requesting the full available history.
pub const OUTPUT_SIZE_FULL: &str = "full";

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Environment variable holding the API key (required).
pub const ENV_API_KEY: &str = "ALPHAVANTAGE_API_KEY";

/// Environment variable overriding [`API_BASE_URL`].
pub const ENV_BASE_URL: &str = "ALPHAVANTAGE_BASE_URL";

/// Environment variable overriding [`DEFAULT_TIMEOUT_SECS`].
pub const ENV_TIMEOUT_SECS: &str = "ALPHAVANTAGE_TIMEOUT_SECS";

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Request timeout applied to every upstream call, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Symbol shown when the dashboard is opened without input.
pub const DEFAULT_SYMBOL: &str = "IBM";

/// Number of bars in the trailing moving average window.
pub const MOVING_AVERAGE_PERIOD: usize = 50;

/// Chart height in pixels.
pub const CHART_HEIGHT: u32 = 600;

/// plotly.js bundle loaded by the HTML output.
pub const PLOTLY_CDN_URL: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
