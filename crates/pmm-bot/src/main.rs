//! Adaptive PMM paper-trading bot - entry point.

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// Adaptive PMM paper-trading bot
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via PMM_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    pmm_bot::init_logging();

    info!("Starting adaptive PMM bot v{}", env!("CARGO_PKG_VERSION"));

    let config = match args.config.or_else(|| std::env::var("PMM_CONFIG").ok()) {
        Some(path) => {
            info!(config_path = %path, "Loading configuration");
            pmm_bot::AppConfig::from_file(&path)?
        }
        None => pmm_bot::AppConfig::load()?,
    };

    let mut app = pmm_bot::Application::new(config)?;
    app.run().await?;

    Ok(())
}
