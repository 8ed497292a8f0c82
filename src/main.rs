use chatlens::cli::run_command;
use chatlens::cli::Cli;
use chatlens::config::AppConfig;
use chatlens::Result;
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::load()?,
    };

    // Initialize logging
    if cli.verbose {
        chatlens::logging::init_logging_with_level("debug")?;
    } else {
        chatlens::logging::init_logging_with_config(&config)?;
    }
    info!("Configuration loaded successfully");

    run_command(&config, cli.command).await
}
