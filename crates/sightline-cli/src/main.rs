//! sightline command-line front end
//!
//! Usage:
//!   sightline simulate --steps 36 --yaw-step 10
//!   sightline --json --target 10,0,0 simulate --raw --pitch 15
//!   sightline replay recording.jsonl

use anyhow::{Context, Result};
use clap::Parser;
use sightline_core::SightlineConfig;
use tracing_subscriber::{fmt, EnvFilter};

mod app;
mod cli;
mod output;
mod replay;

use cli::{Cli, Command};
use output::{stdout_printer, OutputFormat};

fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<SightlineConfig> {
    let mut config =
        SightlineConfig::resolve(cli.config.as_deref()).context("Failed to load configuration")?;

    if let Some(device) = cli.device {
        config.locations.device = device;
    }
    if let Some(target) = cli.target {
        config.locations.target = target;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(&config.logging.level);

    let printer = stdout_printer(OutputFormat::from_json_flag(cli.json));
    match &cli.command {
        Command::Simulate(args) => {
            app::simulate(&config, args, printer).await?;
        }
        Command::Replay { file } => {
            app::replay(&config, file, printer).await?;
        }
    }

    Ok(())
}
