//! Chart and metric rendering.
//!
//! Produces a Plotly figure description (`{"data": [...], "layout": {...}}`)
//! from a windowed [`Series`], plus the three summary metrics. The figure can
//! be written as JSON or wrapped in a standalone HTML page.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::constants::{CHART_HEIGHT, PLOTLY_CDN_URL};
use crate::error::Result;
use crate::types::enums::ChartStyle;
use crate::types::series::{PriceChange, Series};

// ---------------------------------------------------------------------------
// Figure
// ---------------------------------------------------------------------------

/// A Plotly figure: traces plus layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

/// One Plotly trace, tagged by its `type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Candlestick(CandlestickTrace),
    Scatter(ScatterTrace),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandlestickTrace {
    pub x: Vec<NaiveDate>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTrace {
    pub x: Vec<NaiveDate>,
    pub y: Vec<f64>,
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fillcolor: Option<String>,
    pub line: Line,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub color: String,
    pub width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    pub xaxis: XAxis,
    pub yaxis: YAxis,
    pub template: String,
    pub height: u32,
    pub showlegend: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XAxis {
    pub title: Title,
    /// Hides calendar days with no bar so candles sit side by side.
    pub rangebreaks: Vec<RangeBreak>,
    pub rangeslider: RangeSlider,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YAxis {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeBreak {
    pub values: Vec<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSlider {
    pub visible: bool,
}

impl Figure {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Standalone page: metrics row above the chart, plotly.js from its CDN.
    pub fn to_html(&self, metrics: &[Metric]) -> Result<String> {
        // A literal `<` could open or close a tag inside the script block.
        let figure = self.to_json()?.replace('<', "\\u003c");
        let title = escape_html(&self.layout.title.text);

        let mut cards = String::new();
        for m in metrics {
            cards.push_str(&format!(
                "<div class=\"metric\"><div class=\"label\">{}</div><div class=\"value\">{}</div>",
                escape_html(&m.label),
                escape_html(&m.value)
            ));
            if let Some(delta) = &m.delta {
                let class = if delta.starts_with('-') { "down" } else { "up" };
                cards.push_str(&format!(
                    "<div class=\"delta {class}\">{}</div>",
                    escape_html(delta)
                ));
            }
            cards.push_str("</div>");
        }

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{PLOTLY_CDN_URL}"></script>
<style>
body {{ font-family: sans-serif; margin: 2rem; }}
.metrics {{ display: flex; gap: 3rem; margin-bottom: 1rem; }}
.metric .label {{ color: #555; font-size: 0.9rem; }}
.metric .value {{ font-size: 2rem; }}
.delta.up {{ color: #09ab3b; }}
.delta.down {{ color: #ff2b2b; }}
</style>
</head>
<body>
<h1>Stock Dashboard</h1>
<div class="metrics">{cards}</div>
<div id="chart"></div>
<script>
const figure = {figure};
Plotly.newPlot("chart", figure.data, figure.layout);
</script>
</body>
</html>
"#
        ))
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Trend colour
// ---------------------------------------------------------------------------

/// Direction of the window's close, used to colour the area chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    /// `Up` only when the last close is strictly above the first.
    pub fn of(series: &Series) -> Self {
        match (series.first(), series.last()) {
            (Some(first), Some(last)) if last.close > first.close => Self::Up,
            _ => Self::Down,
        }
    }

    pub fn line_color(self) -> &'static str {
        match self {
            Self::Up => "green",
            Self::Down => "red",
        }
    }

    pub fn fill_color(self) -> &'static str {
        match self {
            Self::Up => "rgba(0, 255, 0, 0.2)",
            Self::Down => "rgba(255, 0, 0, 0.2)",
        }
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Options for [`build_figure`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub style: ChartStyle,
    /// Overlay the moving-average column as a line.
    pub show_moving_average: bool,
}

/// Chart title, e.g. `"IBM Candlestick Price Chart"`.
pub fn chart_title(symbol: &str, style: ChartStyle) -> String {
    format!("{} {style} Price Chart", symbol.to_uppercase())
}

/// Build the figure for an already-windowed series.
///
/// `missing` are the calendar dates to suppress on the x axis.
pub fn build_figure(series: &Series, missing: &BTreeSet<NaiveDate>, opts: RenderOptions) -> Figure {
    let x: Vec<NaiveDate> = series.bars().iter().map(|b| b.date).collect();

    let price = match opts.style {
        ChartStyle::Candlestick => Trace::Candlestick(CandlestickTrace {
            x: x.clone(),
            open: series.bars().iter().map(|b| b.open).collect(),
            high: series.bars().iter().map(|b| b.high).collect(),
            low: series.bars().iter().map(|b| b.low).collect(),
            close: series.closes().collect(),
            name: "OHLC".into(),
        }),
        ChartStyle::Area => {
            let trend = Trend::of(series);
            Trace::Scatter(ScatterTrace {
                x: x.clone(),
                y: series.closes().collect(),
                mode: "lines".into(),
                fill: Some("tozeroy".into()),
                fillcolor: Some(trend.fill_color().into()),
                line: Line {
                    color: trend.line_color().into(),
                    width: 2,
                },
                name: "Price".into(),
            })
        }
    };

    let mut data = vec![price];
    if opts.show_moving_average {
        let (ma_x, ma_y): (Vec<NaiveDate>, Vec<f64>) = series
            .bars()
            .iter()
            .filter_map(|b| b.moving_average.map(|m| (b.date, m)))
            .unzip();
        if !ma_x.is_empty() {
            data.push(Trace::Scatter(ScatterTrace {
                x: ma_x,
                y: ma_y,
                mode: "lines".into(),
                fill: None,
                fillcolor: None,
                line: Line {
                    color: "orange".into(),
                    width: 1,
                },
                name: "50 DMA".into(),
            }));
        }
    }

    Figure {
        data,
        layout: Layout {
            title: Title {
                text: chart_title(series.symbol(), opts.style),
            },
            xaxis: XAxis {
                title: Title {
                    text: "Date".into(),
                },
                rangebreaks: vec![RangeBreak {
                    values: missing.iter().copied().collect(),
                }],
                rangeslider: RangeSlider { visible: false },
            },
            yaxis: YAxis {
                title: Title {
                    text: "Price (USD)".into(),
                },
            },
            template: "simple_white".into(),
            height: CHART_HEIGHT,
            showlegend: opts.show_moving_average,
        },
    }
}

/// One summary figure shown above the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<String>,
}

/// `Start Price`, `End Price`, and `Change` (with percentage delta).
pub fn metric_widgets(change: &PriceChange) -> Vec<Metric> {
    vec![
        Metric {
            label: "Start Price".into(),
            value: dollars(change.start_price),
            delta: None,
        },
        Metric {
            label: "End Price".into(),
            value: dollars(change.end_price),
            delta: None,
        },
        Metric {
            label: "Change".into(),
            value: dollars(change.abs_change),
            delta: Some(format!("{:.2}%", change.pct_change)),
        },
    ]
}

fn dollars(v: f64) -> String {
    if v < 0.0 {
        format!("-${:.2}", -v)
    } else {
        format!("${v:.2}")
    }
}
