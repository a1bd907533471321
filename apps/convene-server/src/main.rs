use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use runtime::{init_logging, AppConfig};

mod server;

/// Convene Server - event platform backend
#[derive(Parser)]
#[command(name = "convene-server")]
#[command(about = "Convene Server - event platform backend")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    init_logging(&config.logging);
    tracing::info!("Convene Server starting");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => server::run(config).await,
        Commands::Check => check_config(config),
    }
}

fn check_config(config: AppConfig) -> Result<()> {
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}
