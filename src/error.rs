//! Error types for the `stock-dashboard` crate.
//!
//! All fallible operations in this crate return [`Result<T>`], which is an
//! alias for `std::result::Result<T, DashboardError>`.
//!
//! [`DashboardError`] covers:
//! - **Empty symbol** — Rejected before any network call
//! - **Provider notices** — Alpha Vantage `Error Message` / `Note` / `Information` bodies
//! - **Missing or malformed series** — The response lacks usable daily bars
//! - **HTTP status and transport errors** — Unexpected codes, network, TLS, timeouts
//! - **JSON errors** — Deserialization failures
//! - **Configuration, URL and I/O errors**
//!
//! A price change over a window the series cannot cover is not a
//! `DashboardError`: it is reported as [`WindowUnresolvable`] so callers can
//! keep rendering the chart without metrics.

use std::fmt;

use chrono::NaiveDate;

use crate::types::enums::Window;

/// Which notice field Alpha Vantage used to explain a refused request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiNoticeKind {
    /// `"Error Message"` — typically an unknown symbol or bad parameters.
    ErrorMessage,
    /// `"Note"` — call frequency exceeded.
    Note,
    /// `"Information"` — daily quota exhausted or premium-only endpoint.
    Information,
}

impl fmt::Display for ApiNoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ErrorMessage => "Error Message",
            Self::Note => "Note",
            Self::Information => "Information",
        })
    }
}

/// Notice returned by Alpha Vantage in place of data (still HTTP 200).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiNotice {
    pub kind: ApiNoticeKind,
    pub message: String,
}

impl fmt::Display for ApiNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

/// All possible errors produced by the dashboard pipeline.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// No symbol was entered.
    #[error("enter a stock symbol")]
    EmptySymbol,

    /// Alpha Vantage answered with a notice instead of data.
    #[error("API error: {0}")]
    Api(ApiNotice),

    /// The response did not carry the `"Time Series (Daily)"` key.
    #[error("no daily time series in response for {symbol}")]
    MissingTimeSeries {
        /// The requested symbol.
        symbol: String,
    },

    /// The daily time series was present but held no bars.
    #[error("daily time series for {symbol} is empty")]
    EmptySeries {
        /// The requested symbol.
        symbol: String,
    },

    /// A bar had an unparsable date or numeric field.
    #[error("malformed bar {date}: {reason}")]
    MalformedBar {
        /// The raw date key of the offending bar.
        date: String,
        /// What failed to parse.
        reason: String,
    },

    /// The server returned an unexpected HTTP status code.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// The HTTP status code.
        status: reqwest::StatusCode,
        /// The response body text.
        body: String,
    },

    /// A network or transport-level error from `reqwest` (includes timeouts).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to deserialize a JSON response body.
    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// An error building or parsing a URL.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Missing or invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Writing rendered output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The caller provided an invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl DashboardError {
    /// `true` for every failure that means "no data could be obtained for this
    /// symbol": transport, status, provider notice, and response-shape errors.
    ///
    /// These halt the pipeline before any transformation or rendering.
    pub fn is_data_unavailable(&self) -> bool {
        matches!(
            self,
            Self::Api(_)
                | Self::MissingTimeSeries { .. }
                | Self::EmptySeries { .. }
                | Self::MalformedBar { .. }
                | Self::HttpStatus { .. }
                | Self::Http(_)
                | Self::Json(_)
        )
    }
}

/// A price change was requested for a window the series does not cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{window} price change unavailable: no bar on or before {}", display_cutoff(.cutoff))]
pub struct WindowUnresolvable {
    /// The requested window.
    pub window: Window,
    /// Latest date a start bar could have had, if one could be computed.
    pub cutoff: Option<NaiveDate>,
}

fn display_cutoff(cutoff: &Option<NaiveDate>) -> String {
    cutoff.map_or_else(|| "the first bar".to_owned(), |d| d.to_string())
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DashboardError>;
