//! Time Series endpoints — full daily OHLCV history.

use crate::client::AlphaVantageClient;
use crate::constants::{FUNCTION_TIME_SERIES_DAILY, OUTPUT_SIZE_FULL};
use crate::error::{DashboardError, Result};
use crate::types::series::{Bar, Series};
use crate::types::time_series::DailyTimeSeriesResponse;

impl AlphaVantageClient {
    /// Retrieve the full daily OHLCV history for `symbol`, oldest bar first.
    ///
    /// Fails with [`DashboardError::EmptySymbol`] before any network call when
    /// `symbol` is blank. Every other failure is "data unavailable" (see
    /// [`DashboardError::is_data_unavailable`]).
    ///
    /// **Endpoint:** `GET /query?function=TIME_SERIES_DAILY&outputsize=full`
    pub async fn get_daily_series(&self, symbol: &str) -> Result<Series> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(DashboardError::EmptySymbol);
        }

        let resp: DailyTimeSeriesResponse = self
            .get_query(&[
                ("function", FUNCTION_TIME_SERIES_DAILY),
                ("symbol", symbol),
                ("outputsize", OUTPUT_SIZE_FULL),
            ])
            .await?;

        let series = daily_series_from_response(symbol, resp)?;
        tracing::info!(
            symbol = series.symbol(),
            bars = series.len(),
            first = ?series.first().map(|b| b.date),
            last = ?series.last().map(|b| b.date),
            "fetched daily series"
        );
        Ok(series)
    }
}

/// Convert a daily response body into a [`Series`].
///
/// A non-empty series is used even when the body also carries a notice.
/// Otherwise the notice is reported ahead of a missing or empty series so an
/// invalid symbol or rate limit surfaces its own message.
pub fn daily_series_from_response(symbol: &str, resp: DailyTimeSeriesResponse) -> Result<Series> {
    let notice = resp.notice();
    let raw = match resp.time_series {
        Some(raw) if !raw.is_empty() => raw,
        other => {
            if let Some(notice) = notice {
                return Err(DashboardError::Api(notice));
            }
            let symbol = symbol.to_owned();
            return Err(match other {
                Some(_) => DashboardError::EmptySeries { symbol },
                None => DashboardError::MissingTimeSeries { symbol },
            });
        }
    };
    if let Some(notice) = &notice {
        tracing::debug!(%notice, "provider notice ignored, series present");
    }

    let bars = raw
        .iter()
        .map(|(date, bar)| bar.to_bar(date))
        .collect::<Result<Vec<Bar>>>()?;

    let symbol = resp
        .meta_data
        .map(|m| m.symbol)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| symbol.to_owned());

    // Keys are ascending strings; `Series::new` re-sorts by parsed date anyway
    // in case the provider ever zero-pads inconsistently.
    Ok(Series::new(symbol, bars))
}
