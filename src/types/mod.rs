//! Request, response, and domain types.
//!
//! ## Organization
//!
//! - [`enums`] — Window and chart-style selectors
//! - [`time_series`] — Alpha Vantage `TIME_SERIES_DAILY` wire types
//! - [`series`] — Bars, series, and price change summaries
//!
//! The most used types are re-exported at the module root.

pub mod enums;
pub mod series;
pub mod time_series;

pub use enums::*;
pub use series::{Bar, PriceChange, Series};
