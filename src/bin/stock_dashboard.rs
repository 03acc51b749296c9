//! Command-line front end: fetch one symbol, print the metrics, and write the
//! chart as Plotly JSON or a standalone HTML page.
//!
//! # Usage
//!
//! ```sh
//! export ALPHAVANTAGE_API_KEY="your-api-key"
//! cargo run --features cli -- --symbol IBM --chart area --period 1Y --format html -o ibm.html
//! ```

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use stock_dashboard::constants::DEFAULT_SYMBOL;
use stock_dashboard::{
    ChartStyle, Dashboard, DashboardConfig, DashboardError, DashboardRequest, DashboardView,
    Window,
};

#[derive(Parser)]
#[command(author, version, about = "Daily stock chart and price change metrics from Alpha Vantage")]
struct Cli {
    /// Stock symbol, e.g. IBM or MSFT
    #[arg(short, long, default_value = DEFAULT_SYMBOL)]
    symbol: String,

    /// Chart type: Candlestick or Area
    #[arg(short, long, default_value = "candlestick")]
    chart: ChartStyle,

    /// Time period: 1D, 1W, 1M, 3M, 1Y, 5Y or ALL
    #[arg(short, long, default_value = "1D")]
    period: Window,

    /// Output format for the chart
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Write the chart here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overlay the 50-day moving average
    #[arg(long)]
    show_sma: bool,

    /// Override ALPHAVANTAGE_BASE_URL
    #[arg(long)]
    base_url: Option<String>,

    /// Override ALPHAVANTAGE_TIMEOUT_SECS
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Html,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(DashboardError::EmptySymbol) => {
            eprintln!("Enter a valid stock symbol (--symbol).");
            ExitCode::from(2)
        }
        Err(e) if e.is_data_unavailable() => {
            eprintln!("Error retrieving data. Check symbol: {e}");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> stock_dashboard::Result<()> {
    let mut config = DashboardConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let request = DashboardRequest {
        symbol: cli.symbol,
        chart_style: cli.chart,
        window: cli.period,
        show_moving_average: cli.show_sma,
    };

    let view = Dashboard::from_config(config)?.run(&request).await?;
    print_metrics(&view);

    let rendered = match cli.format {
        OutputFormat::Json => view.figure.to_json_pretty()?,
        OutputFormat::Html => view.to_html()?,
    };
    match cli.output {
        Some(path) => {
            fs::write(&path, rendered)?;
            eprintln!("Chart written to {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

/// Metrics go to stderr so stdout stays a clean chart document.
fn print_metrics(view: &DashboardView) {
    eprintln!(
        "{} · {} · {} bars",
        view.symbol, view.window, view.bars_shown
    );
    if view.metrics.is_empty() {
        eprintln!("  (not enough history for a {} change)", view.window);
    }
    for m in &view.metrics {
        match &m.delta {
            Some(delta) => eprintln!("  {:<12} {} ({delta})", m.label, m.value),
            None => eprintln!("  {:<12} {}", m.label, m.value),
        }
    }
}
