use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use iptv_scanner::{
    config::Config, discovery::DiscoveryOrchestrator, output::ScanOutputWriter,
};

#[derive(Parser)]
#[command(name = "iptv-scanner")]
#[command(version)]
#[command(about = "Discovers live IPTV manifest servers around seed addresses")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path (defaults to $CONFIG_FILE, then config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Seed list file, one scheme://ip:port per line (overrides config file)
    #[arg(short, long, value_name = "FILE")]
    seeds: Option<PathBuf>,

    /// Concurrent probe/harvest tasks
    #[arg(short, long, value_name = "N")]
    workers: Option<usize>,

    /// Per-request timeout, e.g. 2s or 1500ms
    #[arg(short, long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    timeout: Option<Duration>,

    /// Retries on 429/5xx responses
    #[arg(short, long, value_name = "N")]
    retries: Option<u32>,

    /// Where to write the live url list
    #[arg(long, value_name = "FILE")]
    ip_output: Option<PathBuf>,

    /// Where to write the channel list
    #[arg(long, value_name = "FILE")]
    channel_output: Option<PathBuf>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with specified level
    let log_filter = if cli.log_level == "trace" {
        format!("iptv_scanner={},reqwest=debug", cli.log_level)
    } else {
        format!("iptv_scanner={}", cli.log_level)
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting IPTV scanner v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match &cli.config {
        Some(path) => {
            let config = Config::load_from_file(path)?;
            info!("Configuration loaded from: {}", path);
            config
        }
        None => Config::load()?,
    };

    // Override config with CLI arguments
    if let Some(seeds) = cli.seeds {
        config.seeds.seed_file = Some(seeds);
    }
    if let Some(workers) = cli.workers {
        config.scan.max_workers = workers;
    }
    if let Some(timeout) = cli.timeout {
        config.scan.request_timeout = timeout;
    }
    if let Some(retries) = cli.retries {
        config.scan.max_retries = retries;
    }
    if let Some(path) = cli.ip_output {
        config.output.ip_list_path = path;
    }
    if let Some(path) = cli.channel_output {
        config.output.channel_list_path = path;
    }
    config.validate()?;

    let seeds = config.resolve_seeds()?;
    info!(
        "Scanning {} seeds with {} workers (timeout {:?}, {} retries)",
        seeds.len(),
        config.scan.max_workers,
        config.scan.request_timeout,
        config.scan.max_retries
    );

    let orchestrator = DiscoveryOrchestrator::from_config(&config)?;
    let report = orchestrator.run(&seeds).await;

    let writer = ScanOutputWriter::new(&config.output);
    let today = chrono::Local::now().date_naive();
    writer.write_live_hosts(today, &report.live_urls).await?;
    writer.write_channels(&report.channels).await?;

    info!("Scan complete in {:.2} seconds", report.elapsed.as_secs_f64());
    info!("Live urls: {}", report.live_urls.len());
    info!("Channels: {}", report.channels.len());
    info!(
        "Results saved to {} and {}",
        writer.ip_list_path().display(),
        writer.channel_list_path().display()
    );

    Ok(())
}
