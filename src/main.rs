use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::info;

use spacex_report::apis::spacex::SpacexClient;
use spacex_report::config::Config;
use spacex_report::constants::LOG_DIR;
use spacex_report::{logging, metrics, report};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "spacex_report")]
#[command(about = "Fetch SpaceX launches and rockets and print aggregate views")]
#[command(version)]
struct Cli {
    /// Rocket name to list launches for (case-insensitive)
    #[arg(long)]
    category: Option<String>,

    /// How many entries the ranked views show
    #[arg(long)]
    top: Option<usize>,

    /// Base URL of the SpaceX v4 API
    #[arg(long)]
    base_url: Option<String>,

    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Print a Prometheus snapshot of fetch metrics after the report
    #[arg(long)]
    metrics: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let _log_guard = logging::init_logging(Path::new(LOG_DIR));
    metrics::init_metrics();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(category) = cli.category {
        config.category = category;
    }
    if let Some(top) = cli.top {
        config.top_n = top;
    }
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    info!(?config, "Configuration loaded");

    let client = SpacexClient::new(&config.base_url, config.timeout_seconds)?;
    let report = report::generate(&client, &config)
        .await
        .context("fetching SpaceX data")?;

    match cli.format {
        OutputFormat::Text => print!("{}", report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if cli.metrics {
        if let Some(snapshot) = metrics::render() {
            println!("\n📈 Metrics\n{}", snapshot);
        }
    }

    Ok(())
}
