//! Domain types — daily bars, the per-symbol series, and price change summaries.

use chrono::NaiveDate;
use serde::Serialize;

use crate::types::enums::Window;

// ---------------------------------------------------------------------------
// Bar
// ---------------------------------------------------------------------------

/// One trading day's OHLCV record.
///
/// `high >= max(open, close) >= min(open, close) >= low` is assumed from the
/// provider and not checked here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    /// Trailing mean of `close`; `None` until attached by
    /// [`Series::with_moving_average`] or while history is too short.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moving_average: Option<f64>,
}

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

/// Daily bars for one symbol, ascending by date with no duplicate dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    symbol: String,
    bars: Vec<Bar>,
}

impl Series {
    /// Build a series from bars in any order.
    ///
    /// Bars are sorted by date; when a date appears more than once the last
    /// occurrence wins.
    pub fn new(symbol: impl Into<String>, mut bars: Vec<Bar>) -> Self {
        bars.reverse();
        // Stable sort on the reversed input keeps the last duplicate first.
        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    /// Wrap bars already known to be strictly ascending by date.
    pub(crate) fn from_sorted(symbol: String, bars: Vec<Bar>) -> Self {
        debug_assert!(bars.windows(2).all(|w| w[0].date < w[1].date));
        Self { symbol, bars }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first(&self) -> Option<&Bar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Close prices in date order.
    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.bars.iter().map(|b| b.close)
    }

    pub fn into_bars(self) -> Vec<Bar> {
        self.bars
    }
}

// ---------------------------------------------------------------------------
// Price Change
// ---------------------------------------------------------------------------

/// Start/end comparison of close prices over a [`Window`].
///
/// Prices and changes are rounded to 2 decimal places; the percentage is
/// computed from the unrounded prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceChange {
    pub window: Window,
    /// Nominal window start: last date minus the window length, or the first
    /// bar's date for [`Window::All`].
    pub start: NaiveDate,
    /// Date of the last bar.
    pub end: NaiveDate,
    /// Date of the bar whose close is `start_price`.
    pub start_bar_date: NaiveDate,
    pub start_price: f64,
    pub end_price: f64,
    pub abs_change: f64,
    pub pct_change: f64,
}

impl PriceChange {
    /// Compare `start_bar` against `end_bar`.
    pub fn between(window: Window, start: NaiveDate, start_bar: &Bar, end_bar: &Bar) -> Self {
        let abs_change = end_bar.close - start_bar.close;
        let pct_change = abs_change / start_bar.close * 100.0;
        Self {
            window,
            start,
            end: end_bar.date,
            start_bar_date: start_bar.date,
            start_price: round2(start_bar.close),
            end_price: round2(end_bar.close),
            abs_change: round2(abs_change),
            pct_change: round2(pct_change),
        }
    }

    /// `true` when the window closed higher than it opened.
    pub fn is_gain(&self) -> bool {
        self.abs_change > 0.0
    }
}

/// Round to 2 decimal places, ties to even (`100.125` becomes `100.12`).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(day: u32, close: f64) -> Bar {
        Bar {
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 10,
            moving_average: None,
        }
    }

    #[test]
    fn half_cent_ties_round_to_even() {
        assert_eq!(round2(100.125), 100.12);
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(-0.125), -0.12);
    }

    #[test]
    fn price_change_uses_even_rounding() {
        let series = Series::new("X", vec![bar(1, 100.0), bar(2, 100.125)]);
        let change = series.price_change(Window::All).unwrap();
        assert_eq!(change.start_price, 100.0);
        assert_eq!(change.end_price, 100.12);
        assert_eq!(change.abs_change, 0.12);
    }
}
