//! The fetch → transform → render pipeline behind one dashboard view.
//!
//! Every [`Dashboard::run`] call is independent: nothing is cached between
//! requests and the fetched [`Series`] is dropped once the view is built.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::client::AlphaVantageClient;
use crate::config::DashboardConfig;
use crate::constants::{DEFAULT_SYMBOL, MOVING_AVERAGE_PERIOD};
use crate::error::{DashboardError, Result};
use crate::render::{self, Figure, Metric, RenderOptions};
use crate::types::enums::{ChartStyle, Window};
use crate::types::series::{PriceChange, Series};

/// User inputs for one dashboard render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardRequest {
    pub symbol: String,
    pub chart_style: ChartStyle,
    pub window: Window,
    pub show_moving_average: bool,
}

impl Default for DashboardRequest {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_SYMBOL.to_owned(),
            chart_style: ChartStyle::default(),
            window: Window::default(),
            show_moving_average: false,
        }
    }
}

impl DashboardRequest {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }
}

/// Everything the page shows for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub symbol: String,
    pub window: Window,
    pub chart_style: ChartStyle,
    /// `None` when the window reaches past the available history.
    pub price_change: Option<PriceChange>,
    /// Empty whenever `price_change` is `None`.
    pub metrics: Vec<Metric>,
    /// Bars plotted after window filtering.
    pub bars_shown: usize,
    pub missing_dates: BTreeSet<NaiveDate>,
    pub figure: Figure,
}

impl DashboardView {
    /// Standalone HTML page for this view.
    pub fn to_html(&self) -> Result<String> {
        self.figure.to_html(&self.metrics)
    }
}

/// Runs dashboard requests against one Alpha Vantage client.
#[derive(Debug, Clone)]
pub struct Dashboard {
    client: AlphaVantageClient,
}

impl Dashboard {
    pub fn new(client: AlphaVantageClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: DashboardConfig) -> Result<Self> {
        Ok(Self::new(AlphaVantageClient::new(config)?))
    }

    pub fn client(&self) -> &AlphaVantageClient {
        &self.client
    }

    /// Fetch, transform, and render one view.
    ///
    /// A blank symbol fails with [`DashboardError::EmptySymbol`] before any
    /// request is made; a failed fetch ends the pass with no partial view.
    pub async fn run(&self, request: &DashboardRequest) -> Result<DashboardView> {
        if request.symbol.trim().is_empty() {
            return Err(DashboardError::EmptySymbol);
        }

        let series = self.client.get_daily_series(&request.symbol).await?;
        Ok(build_view(series, request))
    }
}

/// Transform and render an already-fetched series.
pub fn build_view(series: Series, request: &DashboardRequest) -> DashboardView {
    let series = series.with_moving_average(MOVING_AVERAGE_PERIOD);
    let windowed = series.windowed(request.window);

    let price_change = match series.price_change(request.window) {
        Ok(change) => Some(change),
        Err(e) => {
            tracing::warn!(symbol = series.symbol(), error = %e, "metrics omitted");
            None
        }
    };
    let metrics = price_change
        .as_ref()
        .map(render::metric_widgets)
        .unwrap_or_default();

    // Gaps outside the plotted range never reach the axis.
    let missing_dates = windowed.missing_calendar_dates();
    let figure = render::build_figure(
        &windowed,
        &missing_dates,
        RenderOptions {
            style: request.chart_style,
            show_moving_average: request.show_moving_average,
        },
    );

    tracing::debug!(
        symbol = series.symbol(),
        window = %request.window,
        bars = windowed.len(),
        gaps = missing_dates.len(),
        "view built"
    );

    DashboardView {
        symbol: series.symbol().to_uppercase(),
        window: request.window,
        chart_style: request.chart_style,
        price_change,
        metrics,
        bars_shown: windowed.len(),
        missing_dates,
        figure,
    }
}
