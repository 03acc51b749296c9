//! REST API endpoint implementations.
//!
//! Each sub-module adds high-level `async` methods to
//! [`AlphaVantageClient`](crate::client::AlphaVantageClient) via `impl`
//! blocks. All methods handle query construction, HTTP transport, and error
//! mapping automatically.
//!
//! ## Usage
//!
//! ```no_run
//! use stock_dashboard::AlphaVantageClient;
//!
//! # #[tokio::main]
//! # async fn main() -> stock_dashboard::Result<()> {
//! let client = AlphaVantageClient::from_env()?;
//! let series = client.get_daily_series("MSFT").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! | Module | Endpoints | Description |
//! |---|---|---|
//! | [`time_series`] | 1 | Full daily OHLCV history |

pub mod time_series;
