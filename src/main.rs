use anyhow::Result;
use clap::Parser;
use talent_scout::cli::{self, Cli};
use talent_scout::config::AppConfig;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Logging goes to stderr so the chat transcript on stdout stays clean
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;

    info!("Backend: {}", config.api_url);
    info!("Export directory: {}", config.output_dir.display());

    cli::run(cli, config).await
}
