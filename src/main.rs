mod api_types;
mod cache;
mod client;
mod config;
mod metrics;
mod models;
mod options;
mod orchestrator;
mod payload;
mod prompts;
mod render;
mod sanitize;
mod schema;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

use cache::SnapshotCache;
use options::{AnalysisMode, LookbackWindow, Region};
use orchestrator::{run_scan, ScanOptions};

/// Brand Pulse - grocery brand-trend dashboard generator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// How to weigh findings before reporting them
    #[arg(short, long, value_enum, default_value = "strict")]
    mode: AnalysisMode,

    /// Search horizon for weekly mention counting
    #[arg(short, long, value_enum, default_value = "7d")]
    window: LookbackWindow,

    /// Geographic scope of the scan
    #[arg(short, long, value_enum, default_value = "all")]
    region: Region,

    /// Output directory for generated files (default: "out")
    #[arg(short, long, default_value = "out")]
    output_dir: String,

    /// Snapshot cache directory
    #[arg(long, default_value = ".cache")]
    cache_dir: String,

    /// Path to config file (overrides BP_CONFIG environment variable)
    #[arg(short, long)]
    config: Option<String>,

    /// Render the cached snapshot for the region without calling the API
    #[arg(long)]
    offline: bool,

    /// Render the detail view for one product by name instead of the dashboard
    #[arg(long)]
    detail: Option<String>,

    /// Only show products in this category (case-insensitive)
    #[arg(long)]
    category: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();

    info!("Starting brand_pulse");

    let args = Args::parse();

    let cfg = if args.offline {
        debug!("Offline mode - skipping config load");
        None
    } else {
        let cfg_path = config::resolve_config_path(args.config.as_deref());
        debug!("Using config file: {}", cfg_path.display());
        Some(config::load_config(&cfg_path)?)
    };

    let cache = SnapshotCache::new(&args.cache_dir);
    let opts = ScanOptions {
        mode: args.mode,
        window: args.window,
        region: args.region,
        offline: args.offline,
        detail: args.detail,
        category: args.category,
        output_dir: args.output_dir,
    };

    run_scan(cfg.as_ref(), &opts, &cache).await
}
