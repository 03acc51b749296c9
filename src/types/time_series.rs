#![allow(missing_docs)]
//! Wire types for `function=TIME_SERIES_DAILY`.
//!
//! Alpha Vantage encodes every number as a string and prefixes field names
//! with an ordinal (`"1. open"`), so these types only carry raw strings.
//! Conversion into [`Bar`](crate::types::series::Bar) happens in
//! [`RawDailyBar::to_bar`].

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{ApiNotice, ApiNoticeKind, DashboardError, Result};
use crate::types::series::Bar;

// ---------------------------------------------------------------------------
// Daily Time Series Response
// ---------------------------------------------------------------------------

/// Body of a daily time series response.
///
/// Every field is optional: a refused request comes back as HTTP 200 with
/// only one of the notice fields set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyTimeSeriesResponse {
    #[serde(rename = "Meta Data", default)]
    pub meta_data: Option<MetaData>,
    /// Date (`YYYY-MM-DD`) to bar. `BTreeMap` keeps keys in ascending order.
    #[serde(rename = "Time Series (Daily)", default)]
    pub time_series: Option<BTreeMap<String, RawDailyBar>>,
    #[serde(rename = "Error Message", default)]
    pub error_message: Option<String>,
    #[serde(rename = "Note", default)]
    pub note: Option<String>,
    #[serde(rename = "Information", default)]
    pub information: Option<String>,
}

impl DailyTimeSeriesResponse {
    /// The provider notice carried instead of data, if any.
    pub fn notice(&self) -> Option<ApiNotice> {
        let fields = [
            (ApiNoticeKind::ErrorMessage, &self.error_message),
            (ApiNoticeKind::Note, &self.note),
            (ApiNoticeKind::Information, &self.information),
        ];
        fields.into_iter().find_map(|(kind, msg)| {
            msg.as_ref().map(|m| ApiNotice {
                kind,
                message: m.clone(),
            })
        })
    }
}

/// `"Meta Data"` block.
#[derive(Debug, Clone, Deserialize)]
pub struct MetaData {
    #[serde(rename = "1. Information", default)]
    pub information: Option<String>,
    #[serde(rename = "2. Symbol")]
    pub symbol: String,
    #[serde(rename = "3. Last Refreshed", default)]
    pub last_refreshed: Option<String>,
    #[serde(rename = "4. Output Size", default)]
    pub output_size: Option<String>,
    #[serde(rename = "5. Time Zone", default)]
    pub time_zone: Option<String>,
}

// ---------------------------------------------------------------------------
// Raw Daily Bar
// ---------------------------------------------------------------------------

/// One dated entry of `"Time Series (Daily)"`, numbers still string-encoded.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDailyBar {
    #[serde(rename = "1. open")]
    pub open: String,
    #[serde(rename = "2. high")]
    pub high: String,
    #[serde(rename = "3. low")]
    pub low: String,
    #[serde(rename = "4. close")]
    pub close: String,
    #[serde(rename = "5. volume")]
    pub volume: String,
}

impl RawDailyBar {
    /// Parse the date key and numeric strings into a [`Bar`].
    pub fn to_bar(&self, date: &str) -> Result<Bar> {
        let malformed = |reason: String| DashboardError::MalformedBar {
            date: date.to_owned(),
            reason,
        };

        let parsed_date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|e| malformed(format!("date: {e}")))?;
        let price = |name: &str, raw: &str| -> Result<f64> {
            let value = raw
                .trim()
                .parse::<f64>()
                .map_err(|e| malformed(format!("{name} {raw:?}: {e}")))?;
            // `parse` accepts "NaN" and "inf".
            if value.is_finite() {
                Ok(value)
            } else {
                Err(malformed(format!("{name} {raw:?}: not a finite number")))
            }
        };

        Ok(Bar {
            date: parsed_date,
            open: price("open", &self.open)?,
            high: price("high", &self.high)?,
            low: price("low", &self.low)?,
            close: price("close", &self.close)?,
            volume: parse_volume(&self.volume)
                .ok_or_else(|| malformed(format!("volume {:?}", self.volume)))?,
            moving_average: None,
        })
    }
}

/// Volumes are integers, but some feeds send them as `"1234.0"`.
fn parse_volume(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    raw.parse::<u64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v.round() as u64)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "Meta Data": {
            "1. Information": "Daily Prices (open, high, low, close) and Volumes",
            "2. Symbol": "IBM",
            "3. Last Refreshed": "2024-03-04",
            "4. Output Size": "Full size",
            "5. Time Zone": "US/Eastern"
        },
        "Time Series (Daily)": {
            "2024-03-04": {
                "1. open": "185.5000",
                "2. high": "187.0000",
                "3. low": "184.8000",
                "4. close": "186.6000",
                "5. volume": "4301820"
            },
            "2024-03-01": {
                "1. open": "185.4900",
                "2. high": "188.3800",
                "3. low": "185.1800",
                "4. close": "185.0300",
                "5. volume": "4018354"
            }
        }
    }"#;

    #[test]
    fn deserializes_sample_response() {
        let resp: DailyTimeSeriesResponse = serde_json::from_str(SAMPLE).unwrap();
        assert!(resp.notice().is_none());
        assert_eq!(resp.meta_data.as_ref().unwrap().symbol, "IBM");

        let series = resp.time_series.unwrap();
        let dates: Vec<&str> = series.keys().map(String::as_str).collect();
        assert_eq!(dates, ["2024-03-01", "2024-03-04"]);

        let bar = series["2024-03-04"].to_bar("2024-03-04").unwrap();
        assert_eq!(bar.date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(bar.open, 185.5);
        assert_eq!(bar.close, 186.6);
        assert_eq!(bar.volume, 4_301_820);
        assert!(bar.moving_average.is_none());
    }

    #[test]
    fn error_message_becomes_notice() {
        let resp: DailyTimeSeriesResponse = serde_json::from_str(
            r#"{"Error Message": "Invalid API call. Please retry or visit the documentation."}"#,
        )
        .unwrap();
        let notice = resp.notice().unwrap();
        assert_eq!(notice.kind, ApiNoticeKind::ErrorMessage);
        assert!(resp.time_series.is_none());
    }

    #[test]
    fn malformed_price_is_reported_with_its_date() {
        let raw = RawDailyBar {
            open: "n/a".into(),
            high: "1".into(),
            low: "1".into(),
            close: "1".into(),
            volume: "1".into(),
        };
        let err = raw.to_bar("2024-01-02").unwrap_err();
        match err {
            DashboardError::MalformedBar { date, reason } => {
                assert_eq!(date, "2024-01-02");
                assert!(reason.starts_with("open"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_finite_price_is_malformed() {
        for bad in ["NaN", "inf", "-infinity"] {
            let raw = RawDailyBar {
                open: "1".into(),
                high: "1".into(),
                low: "1".into(),
                close: bad.into(),
                volume: "1".into(),
            };
            let err = raw.to_bar("2024-01-02").unwrap_err();
            assert!(err.is_data_unavailable());
            match err {
                DashboardError::MalformedBar { reason, .. } => {
                    assert!(reason.starts_with("close"), "{reason}");
                }
                other => panic!("unexpected error for {bad}: {other:?}"),
            }
        }
    }

    #[test]
    fn volume_accepts_decimal_encoding() {
        assert_eq!(parse_volume("1200"), Some(1200));
        assert_eq!(parse_volume("1200.0"), Some(1200));
        assert_eq!(parse_volume("-5"), None);
        assert_eq!(parse_volume("lots"), None);
    }
}
