//! End-to-end pipeline tests against an in-process mock of the Alpha Vantage
//! query endpoint.
//!
//! The mock is a bare `tokio` TCP listener that answers every connection with
//! one canned HTTP response and records the request line it received.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDate;
use stock_dashboard::error::{ApiNoticeKind, DashboardError};
use stock_dashboard::{
    AlphaVantageClient, ChartStyle, Dashboard, DashboardConfig, DashboardRequest, Window,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

struct MockServer {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockServer {
    /// Serve `body` with `status` to every request.
    async fn start(status: u16, body: String) -> Self {
        Self::start_with_delay(status, body, Duration::ZERO).await
    }

    async fn start_with_delay(status: u16, body: String, delay: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let body = body.clone();
                let seen = Arc::clone(&seen);
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 1024];
                    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut chunk).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => buf.extend_from_slice(&chunk[..n]),
                        }
                    }
                    let head = String::from_utf8_lossy(&buf);
                    let request_line = head.lines().next().unwrap_or_default().to_owned();
                    seen.lock().unwrap().push(request_line);

                    tokio::time::sleep(delay).await;
                    let response = format!(
                        "HTTP/1.1 {status} MOCK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    fn config(&self) -> DashboardConfig {
        DashboardConfig::new("test-key")
            .with_base_url(&self.base_url)
            .with_timeout(Duration::from_secs(5))
    }

    fn dashboard(&self) -> Dashboard {
        Dashboard::from_config(self.config()).unwrap()
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Weekday bars from 2024-01-01 through 2024-04-30, newest first as the
/// provider sends them. Close climbs by 1.0 per bar from 100.0.
fn daily_body(symbol: &str) -> String {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 4, 30).unwrap();
    let weekdays: Vec<NaiveDate> = start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| chrono::Datelike::weekday(d).number_from_monday() <= 5)
        .collect();

    let entries: Vec<String> = weekdays
        .iter()
        .enumerate()
        .rev()
        .map(|(i, d)| {
            let close = 100.0 + i as f64;
            format!(
                r#""{d}": {{"1. open": "{:.4}", "2. high": "{:.4}", "3. low": "{:.4}", "4. close": "{close:.4}", "5. volume": "{}"}}"#,
                close - 0.5,
                close + 1.0,
                close - 1.0,
                1_000_000 + i
            )
        })
        .collect();

    format!(
        r#"{{"Meta Data": {{"1. Information": "Daily Prices (open, high, low, close) and Volumes", "2. Symbol": "{symbol}", "3. Last Refreshed": "{end}", "4. Output Size": "Full size", "5. Time Zone": "US/Eastern"}}, "Time Series (Daily)": {{{}}}}}"#,
        entries.join(", ")
    )
}

#[tokio::test]
async fn fetch_sends_expected_query() {
    let server = MockServer::start(200, daily_body("IBM")).await;
    let client = AlphaVantageClient::new(server.config()).unwrap();

    let series = client.get_daily_series("IBM").await.unwrap();
    assert_eq!(series.symbol(), "IBM");
    assert_eq!(
        series.first().unwrap().date,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    );
    assert_eq!(
        series.last().unwrap().date,
        NaiveDate::from_ymd_opt(2024, 4, 30).unwrap()
    );

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let line = &requests[0];
    assert!(line.starts_with("GET /query?"), "{line}");
    assert!(line.contains("function=TIME_SERIES_DAILY"), "{line}");
    assert!(line.contains("symbol=IBM"), "{line}");
    assert!(line.contains("outputsize=full"), "{line}");
    assert!(line.contains("apikey=test-key"), "{line}");
}

#[tokio::test]
async fn one_month_candlestick_view() {
    let server = MockServer::start(200, daily_body("IBM")).await;
    let request = DashboardRequest {
        window: Window::OneMonth,
        ..DashboardRequest::new("ibm")
    };

    let view = server.dashboard().run(&request).await.unwrap();

    // 2024-04-30 minus 30 days is Sunday 2024-03-31; Friday 03-29 is the start bar.
    let change = view.price_change.unwrap();
    assert_eq!(change.start, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
    assert_eq!(
        change.start_bar_date,
        NaiveDate::from_ymd_opt(2024, 3, 29).unwrap()
    );
    assert_eq!(change.abs_change, 22.0);
    assert_eq!(view.metrics.len(), 3);

    // April 2024 has 22 weekdays, 8 weekend days.
    assert_eq!(view.bars_shown, 22);
    assert_eq!(view.missing_dates.len(), 8);
    assert!(
        view.missing_dates
            .contains(&NaiveDate::from_ymd_opt(2024, 4, 6).unwrap())
    );

    let json = serde_json::to_value(&view.figure).unwrap();
    assert_eq!(json["data"][0]["type"], "candlestick");
    assert_eq!(json["layout"]["title"]["text"], "IBM Candlestick Price Chart");
}

#[tokio::test]
async fn five_year_window_renders_without_metrics() {
    let server = MockServer::start(200, daily_body("IBM")).await;
    let request = DashboardRequest {
        window: Window::FiveYears,
        chart_style: ChartStyle::Area,
        ..DashboardRequest::new("IBM")
    };

    let view = server.dashboard().run(&request).await.unwrap();
    assert!(view.price_change.is_none());
    assert!(view.metrics.is_empty());
    assert_eq!(view.bars_shown, 87);
    let json = serde_json::to_value(&view.figure).unwrap();
    assert_eq!(json["data"][0]["line"]["color"], "green");
}

#[tokio::test]
async fn invalid_symbol_halts_with_api_notice() {
    let body = r#"{"Error Message": "Invalid API call. Please retry or visit the documentation (https://www.alphavantage.co/documentation/) for TIME_SERIES_DAILY."}"#;
    let server = MockServer::start(200, body.to_owned()).await;

    let err = server
        .dashboard()
        .run(&DashboardRequest::new("NOPE"))
        .await
        .unwrap_err();
    assert!(err.is_data_unavailable());
    match err {
        DashboardError::Api(notice) => assert_eq!(notice.kind, ApiNoticeKind::ErrorMessage),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn missing_series_key_is_data_unavailable() {
    let server = MockServer::start(200, "{}".to_owned()).await;
    let err = server
        .dashboard()
        .run(&DashboardRequest::new("IBM"))
        .await
        .unwrap_err();
    assert!(matches!(err, DashboardError::MissingTimeSeries { .. }));
}

#[tokio::test]
async fn server_error_is_data_unavailable() {
    let server = MockServer::start(503, "upstream down".to_owned()).await;
    let err = server
        .dashboard()
        .run(&DashboardRequest::new("IBM"))
        .await
        .unwrap_err();
    match &err {
        DashboardError::HttpStatus { status, body } => {
            assert_eq!(status.as_u16(), 503);
            assert_eq!(body, "upstream down");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_data_unavailable());
}

#[tokio::test]
async fn slow_upstream_hits_timeout() {
    let server =
        MockServer::start_with_delay(200, daily_body("IBM"), Duration::from_secs(3)).await;
    let dashboard = Dashboard::from_config(
        DashboardConfig::new("test-key")
            .with_base_url(&server.base_url)
            .with_timeout(Duration::from_millis(300)),
    )
    .unwrap();

    let err = dashboard
        .run(&DashboardRequest::new("IBM"))
        .await
        .unwrap_err();
    match &err {
        DashboardError::Http(e) => assert!(e.is_timeout(), "{e}"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_data_unavailable());
}

#[tokio::test]
async fn empty_symbol_never_reaches_server() {
    let server = MockServer::start(200, daily_body("IBM")).await;
    let err = server
        .dashboard()
        .run(&DashboardRequest::new(""))
        .await
        .unwrap_err();
    assert!(matches!(err, DashboardError::EmptySymbol));
    assert!(server.requests().is_empty());
}
