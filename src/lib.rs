//! # stock-dashboard
//!
//! Daily stock dashboard backed by the [Alpha Vantage](https://www.alphavantage.co/documentation/)
//! `TIME_SERIES_DAILY` API: fetches the full OHLCV history for a symbol,
//! attaches a 50-day trailing moving average, computes the price change over a
//! selectable window, and renders a gap-aware candlestick or area chart as a
//! Plotly figure.
//!
//! ## Quick Start
//!
//! ```no_run
//! use stock_dashboard::{Dashboard, DashboardConfig, DashboardRequest};
//!
//! #[tokio::main]
//! async fn main() -> stock_dashboard::Result<()> {
//!     let dashboard = Dashboard::from_config(DashboardConfig::from_env()?)?;
//!     let view = dashboard.run(&DashboardRequest::new("IBM")).await?;
//!     std::fs::write("ibm.html", view.to_html()?)?;
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod api;
pub mod client;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod error;
pub mod render;
pub mod types;

/// Re-export the main client type at crate root for convenience.
pub use client::AlphaVantageClient;
pub use config::DashboardConfig;
pub use dashboard::{Dashboard, DashboardRequest, DashboardView};
/// Re-export the error types and Result alias.
pub use error::{DashboardError, Result, WindowUnresolvable};
pub use types::{Bar, ChartStyle, PriceChange, Series, Window};
