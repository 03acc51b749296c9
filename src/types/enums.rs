//! Shared selector enums for the dashboard.
//!
//! Both enums serialize as the short labels shown in the UI (`"1M"`,
//! `"Candlestick"`) and parse case-insensitively from the same labels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Window
// ---------------------------------------------------------------------------

/// Relative time span used to filter a series or compute a price change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Window {
    #[default]
    #[serde(rename = "1D")]
    OneDay,
    #[serde(rename = "1W")]
    OneWeek,
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "5Y")]
    FiveYears,
    /// The whole series, no filtering.
    #[serde(rename = "ALL")]
    All,
}

impl Window {
    /// Every selectable window, shortest first.
    pub const ALL_WINDOWS: [Window; 7] = [
        Self::OneDay,
        Self::OneWeek,
        Self::OneMonth,
        Self::ThreeMonths,
        Self::OneYear,
        Self::FiveYears,
        Self::All,
    ];

    /// Calendar-day length of the window, or `None` for [`Window::All`].
    pub fn days(self) -> Option<u64> {
        match self {
            Self::OneDay => Some(1),
            Self::OneWeek => Some(7),
            Self::OneMonth => Some(30),
            Self::ThreeMonths => Some(90),
            Self::OneYear => Some(365),
            Self::FiveYears => Some(5 * 365),
            Self::All => None,
        }
    }

    /// Short UI label.
    pub fn label(self) -> &'static str {
        match self {
            Self::OneDay => "1D",
            Self::OneWeek => "1W",
            Self::OneMonth => "1M",
            Self::ThreeMonths => "3M",
            Self::OneYear => "1Y",
            Self::FiveYears => "5Y",
            Self::All => "ALL",
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Window {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL_WINDOWS
            .into_iter()
            .find(|w| w.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                DashboardError::InvalidArgument(format!(
                    "unknown period {s:?} (expected one of 1D, 1W, 1M, 3M, 1Y, 5Y, ALL)"
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Chart Style
// ---------------------------------------------------------------------------

/// How the windowed series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChartStyle {
    /// OHLC candles.
    #[default]
    Candlestick,
    /// Filled line under the close price.
    Area,
}

impl fmt::Display for ChartStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Candlestick => "Candlestick",
            Self::Area => "Area",
        })
    }
}

impl FromStr for ChartStyle {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "candlestick" | "candle" | "ohlc" => Ok(Self::Candlestick),
            "area" => Ok(Self::Area),
            _ => Err(DashboardError::InvalidArgument(format!(
                "unknown chart type {s:?} (expected Candlestick or Area)"
            ))),
        }
    }
}
