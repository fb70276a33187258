//! Linking CLI entry point

use clap::Parser;
use tracing::error;

use aura_link_cli::{cli::Cli, commands::CommandDispatcher, config::CliAppConfig, error::Result};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_configuration(&cli)?;
    config.apply_overrides(&cli);

    setup_logging(config.cli.verbose);

    if let Err(e) = CommandDispatcher::execute(cli, config).await {
        error!("Command execution failed: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Setup logging based on verbosity level
fn setup_logging(verbose: bool) {
    let log_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

/// Load configuration from file or use defaults
fn load_configuration(cli: &Cli) -> Result<CliAppConfig> {
    if let Some(config_path) = &cli.config {
        CliAppConfig::load_from_file(config_path)
    } else {
        Ok(CliAppConfig::default())
    }
}
