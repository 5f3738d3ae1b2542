use anyhow::Result;
use clap::Parser;
use resume_analyzer::app_log;
use resume_analyzer::cli::{handle_command, Cli};
use resume_analyzer::core::ConfigManager;
use resume_analyzer::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration before logging so the log file location is known
    let config = ConfigManager::load()?;
    init_logging(&config.logging.log_file, &config.logging.level)?;

    app_log!(
        info,
        "Loaded configuration for environment {}: {}",
        config.environment,
        config.service.api_base_url
    );

    handle_command(cli, config).await
}
