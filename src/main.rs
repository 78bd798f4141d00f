use anyhow::{Context, Result};
use clap::Parser;
use resume_editor::cli::{handle_command, ResumeCli};
use resume_editor::core::ConfigManager;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = ResumeCli::parse();
    let config = ConfigManager::load()?;

    // Logs go to a file so they never mix with command output
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true) // Clear file on startup
        .open(&config.log_file)
        .with_context(|| format!("Failed to open log file {}", config.log_file.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("Invalid log level")?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(Mutex::new(file))
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(filter)
        .init();

    info!("Starting resume editor");
    info!("Backend: {}", config.backend_url);
    info!("Export directory: {}", config.export_dir.display());

    handle_command(cli, config).await
}
